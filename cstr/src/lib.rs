use std::os::raw::c_void;
use std::ptr::copy_nonoverlapping;

pub type Char = u8;
pub type WideChar = u16;

pub const REPLACEMENT: char = '\u{FFFD}';

///
/// utf8_to_utf16_lenient converts a UTF-8 byte slice to UTF-16 code units.
/// Ill-formed sequences (invalid lead byte, bad continuation, overlong
/// encoding, incomplete trailer, surrogate code point, value beyond
/// U+10FFFF) are replaced with U+FFFD. The second element of the returned
/// pair is the index of the first invalid byte, or None for clean input.
///
pub fn utf8_to_utf16_lenient(input: &[u8]) -> (Vec<WideChar>, Option<usize>) {
    let mut out: Vec<WideChar> = Vec::with_capacity(input.len());
    let mut first_invalid = None;
    let mut rest = input;
    let mut consumed = 0usize;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.extend(valid.encode_utf16());
                break;
            }
            Err(err) => {
                let valid_up_to = err.valid_up_to();
                // from_utf8 guarantees the prefix up to valid_up_to is well formed
                let valid = unsafe { std::str::from_utf8_unchecked(&rest[..valid_up_to]) };
                out.extend(valid.encode_utf16());
                if first_invalid.is_none() {
                    first_invalid = Some(consumed + valid_up_to);
                }
                // U+FFFD is a single UTF-16 code unit
                out.push(REPLACEMENT as u16);
                let skip = valid_up_to + err.error_len().unwrap_or(rest.len() - valid_up_to);
                consumed += skip;
                rest = &rest[skip..];
                if rest.is_empty() {
                    break;
                }
            }
        }
    }
    (out, first_invalid)
}

///
/// utf16_to_utf8_lenient converts UTF-16 code units to UTF-8 bytes. Lone
/// high or low surrogates and truncated surrogate pairs are replaced with
/// U+FFFD; valid pairs pass through. The second element of the returned
/// pair is the index of the first invalid code unit, or None for clean
/// input.
///
pub fn utf16_to_utf8_lenient(input: &[WideChar]) -> (Vec<u8>, Option<usize>) {
    let mut out: Vec<u8> = Vec::with_capacity(input.len() * 3);
    let mut first_invalid = None;
    let mut buf = [0u8; 4];
    let mut i = 0usize;
    while i < input.len() {
        let unit = input[i];
        if (0xD800..0xDC00).contains(&unit) {
            // lead surrogate, must be followed by a trail surrogate
            match input.get(i + 1) {
                Some(&trail) if (0xDC00..0xE000).contains(&trail) => {
                    let cp = 0x10000
                        + ((u32::from(unit) - 0xD800) << 10)
                        + (u32::from(trail) - 0xDC00);
                    let c = char::from_u32(cp).unwrap_or(REPLACEMENT);
                    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                    i += 2;
                    continue;
                }
                _ => {
                    if first_invalid.is_none() {
                        first_invalid = Some(i);
                    }
                    out.extend_from_slice(REPLACEMENT.encode_utf8(&mut buf).as_bytes());
                    i += 1;
                    continue;
                }
            }
        }
        if (0xDC00..0xE000).contains(&unit) {
            // lone trail surrogate
            if first_invalid.is_none() {
                first_invalid = Some(i);
            }
            out.extend_from_slice(REPLACEMENT.encode_utf8(&mut buf).as_bytes());
            i += 1;
            continue;
        }
        let c = char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT);
        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        i += 1;
    }
    (out, first_invalid)
}

pub fn from_widechar_vec_lossy(v: Vec<WideChar>) -> String {
    widestring::decode_utf16_lossy(v).collect::<String>()
}

pub fn from_widechar_ref_lossy(v: &[WideChar]) -> String {
    widestring::decode_utf16_lossy(v.iter().copied()).collect::<String>()
}

pub fn to_widechar_vec(s: &str) -> Vec<WideChar> {
    widestring::encode_utf16(s.chars()).collect::<Vec<_>>()
}

///
/// to_widechar_ptr converts the input string to a null terminated UTF-16
/// string. The backing vector is returned so the pointer stays live.
///
pub fn to_widechar_ptr(s: &str) -> (*mut WideChar, Vec<WideChar>) {
    let mut v = to_widechar_vec(s);
    v.push(0);
    (v.as_mut_ptr(), v)
}

///
/// to_char_ptr converts the input string to a null terminated UTF-8 string.
///
pub fn to_char_ptr(s: &str) -> (*mut Char, Vec<u8>) {
    let mut v = s.as_bytes().to_vec();
    v.push(0);
    (v.as_mut_ptr(), v)
}

///
/// input_text_to_string_a converts a narrow C string to a Rust String,
/// replacing ill-formed UTF-8. A negative length means null terminated.
///
/// # Safety
/// Dereferences a raw C pointer.
///
pub unsafe fn input_text_to_string_a(text: *const Char, len: isize) -> String {
    if text.is_null() {
        return String::new();
    }
    let bytes = match len.signum() {
        -1 => {
            let mut dst = Vec::new();
            let mut itr = text;
            while *itr != 0 {
                dst.push(*itr);
                itr = itr.offset(1);
            }
            dst
        }
        0 => Vec::new(),
        _ => std::slice::from_raw_parts(text, len as usize).to_vec(),
    };
    String::from_utf8_lossy(&bytes).into_owned()
}

///
/// input_text_to_string_w converts a wide C string to a Rust String,
/// replacing invalid surrogates. A negative length means null terminated.
///
/// # Safety
/// Dereferences a raw C pointer.
///
pub unsafe fn input_text_to_string_w(text: *const WideChar, len: isize) -> String {
    if text.is_null() {
        return String::new();
    }
    match len.signum() {
        -1 => {
            let mut dst = Vec::new();
            let mut itr = text;
            while *itr != 0 {
                dst.push(*itr);
                itr = itr.offset(1);
            }
            from_widechar_vec_lossy(dst)
        }
        0 => String::new(),
        _ => from_widechar_ref_lossy(std::slice::from_raw_parts(text, len as usize)),
    }
}

///
/// write_string_slice_to_buffer writes the input bytes plus a null
/// terminator into the output buffer, truncating to the buffer length.
/// Returns the number of units written including the terminator.
///
/// # Safety
/// Writes through a raw C pointer.
///
pub unsafe fn write_string_slice_to_buffer(
    message: &[Char],
    len: isize,
    output_ptr: *mut Char,
) -> isize {
    if len <= 0 {
        return 0;
    }
    let len = std::cmp::min(message.len(), (len - 1) as usize);
    copy_nonoverlapping(message[..len].as_ptr(), output_ptr, len);
    *output_ptr.add(len) = 0;
    (len + 1) as isize
}

///
/// write_wstring_slice_to_buffer writes the input UTF-16 units plus a null
/// terminator into the output buffer, truncating to the buffer length.
/// Returns the number of units written including the terminator.
///
/// # Safety
/// Writes through a raw C pointer.
///
pub unsafe fn write_wstring_slice_to_buffer(
    message: &[WideChar],
    len: isize,
    output_ptr: *mut WideChar,
) -> isize {
    if len <= 0 {
        return 0;
    }
    let len = std::cmp::min(message.len(), (len - 1) as usize);
    copy_nonoverlapping(message[..len].as_ptr(), output_ptr, len);
    *output_ptr.add(len) = 0;
    (len + 1) as isize
}

///
/// write_binary_slice_to_buffer writes raw bytes without a terminator.
/// Returns the number of bytes written.
///
/// # Safety
/// Writes through a raw C pointer.
///
pub unsafe fn write_binary_slice_to_buffer(
    message: &[Char],
    len: usize,
    output_ptr: *mut Char,
) -> usize {
    let len = std::cmp::min(message.len(), len);
    copy_nonoverlapping(message[..len].as_ptr(), output_ptr, len);
    len
}

///
/// write_fixed_data writes a single fixed-size value to the output buffer.
/// ODBC callers guarantee the buffer is large enough for fixed types.
///
/// # Safety
/// Writes through a raw C pointer.
///
pub unsafe fn write_fixed_data<T: core::fmt::Debug>(data: &T, output_ptr: *mut c_void) {
    copy_nonoverlapping(data as *const _, output_ptr.cast::<T>(), 1);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn utf8_to_utf16_clean() {
        let (out, invalid) = utf8_to_utf16_lenient("Здравейте".as_bytes());
        assert_eq!(
            vec![0x0417, 0x0434, 0x0440, 0x0430, 0x0432, 0x0435, 0x0439, 0x0442, 0x0435],
            out
        );
        assert_eq!(None, invalid);
    }

    #[test]
    fn utf8_to_utf16_invalid_lead() {
        let (out, invalid) = utf8_to_utf16_lenient(b"a\xffb");
        assert_eq!(vec![u16::from(b'a'), 0xFFFD, u16::from(b'b')], out);
        assert_eq!(Some(1), invalid);
    }

    #[test]
    fn utf8_to_utf16_overlong() {
        // overlong encoding of '/' is rejected
        let (out, invalid) = utf8_to_utf16_lenient(b"\xc0\xaf");
        assert_eq!(Some(0), invalid);
        assert!(out.iter().all(|&u| u == 0xFFFD));
    }

    #[test]
    fn utf8_to_utf16_incomplete_trailer() {
        let (out, invalid) = utf8_to_utf16_lenient(b"ab\xe2\x82");
        assert_eq!(vec![u16::from(b'a'), u16::from(b'b'), 0xFFFD], out);
        assert_eq!(Some(2), invalid);
    }

    #[test]
    fn utf16_to_utf8_clean_pair() {
        // U+1F600 as a surrogate pair
        let (out, invalid) = utf16_to_utf8_lenient(&[0xD83D, 0xDE00]);
        assert_eq!("😀".as_bytes(), &out[..]);
        assert_eq!(None, invalid);
    }

    #[test]
    fn utf16_to_utf8_lone_lead() {
        let (out, invalid) = utf16_to_utf8_lenient(&[u16::from(b'x'), 0xD800, u16::from(b'y')]);
        assert_eq!("x\u{FFFD}y".as_bytes(), &out[..]);
        assert_eq!(Some(1), invalid);
    }

    #[test]
    fn utf16_to_utf8_lone_trail() {
        let (out, invalid) = utf16_to_utf8_lenient(&[0xDC01]);
        assert_eq!("\u{FFFD}".as_bytes(), &out[..]);
        assert_eq!(Some(0), invalid);
    }

    #[test]
    fn utf16_to_utf8_truncated_pair_at_end() {
        let (out, invalid) = utf16_to_utf8_lenient(&[u16::from(b'a'), 0xD83D]);
        assert_eq!("a\u{FFFD}".as_bytes(), &out[..]);
        assert_eq!(Some(1), invalid);
    }

    #[test]
    fn round_trip_plane_0_and_1() {
        let s = "duck 🦆 Здравейте";
        let (utf16, invalid) = utf8_to_utf16_lenient(s.as_bytes());
        assert_eq!(None, invalid);
        let (utf8, invalid) = utf16_to_utf8_lenient(&utf16);
        assert_eq!(None, invalid);
        assert_eq!(s.as_bytes(), &utf8[..]);
    }

    #[test]
    fn test_input_atext_to_string() {
        let expected = "test";
        let test = "test\0".as_bytes().as_ptr();
        let test = unsafe { input_text_to_string_a(test, expected.len() as isize) };
        assert_eq!(expected, test);
    }

    #[test]
    fn test_input_wtext_to_string_nts() {
        let expected = "test";
        let (ptr, _owned) = to_widechar_ptr(expected);
        let test = unsafe { input_text_to_string_w(ptr, -1) };
        assert_eq!(expected, test);
    }

    #[test]
    fn test_write_string_slice_with_enough_space() {
        let input = "test".as_bytes();
        let mut buffer = [0u8; 5];
        let len =
            unsafe { write_string_slice_to_buffer(input, buffer.len() as isize, buffer.as_mut_ptr()) };
        assert_eq!("test\0", String::from_utf8_lossy(&buffer));
        assert_eq!(5, len);
    }

    #[test]
    fn test_write_string_slice_constrained_space() {
        let input = "test".as_bytes();
        let mut buffer = [0u8; 3];
        let len =
            unsafe { write_string_slice_to_buffer(input, buffer.len() as isize, buffer.as_mut_ptr()) };
        assert_eq!("te\0", String::from_utf8_lossy(&buffer));
        assert_eq!(3, len);
    }

    #[test]
    fn test_write_wstring_slice_constrained_space() {
        let input = to_widechar_vec("test");
        let mut buffer = [0u16; 3];
        let len = unsafe {
            write_wstring_slice_to_buffer(&input, buffer.len() as isize, buffer.as_mut_ptr())
        };
        assert_eq!("te\0", from_widechar_ref_lossy(&buffer));
        assert_eq!(3, len);
    }

    #[test]
    fn test_write_binary_slice() {
        let input = "test".as_bytes();
        let mut buffer = [0u8; 3];
        let len = unsafe { write_binary_slice_to_buffer(input, buffer.len(), buffer.as_mut_ptr()) };
        assert_eq!("tes", String::from_utf8_lossy(&buffer));
        assert_eq!(3, len);
    }

    #[test]
    fn test_write_fixed_data() {
        let input = &42i32;
        let output_ptr = Box::into_raw(Box::new([0i32; 1])).cast();
        unsafe { write_fixed_data(input, output_ptr) };
        unsafe {
            assert_eq!(42, *(output_ptr.cast::<i32>()));
            drop(Box::from_raw(output_ptr.cast::<[i32; 1]>()));
        }
    }
}
