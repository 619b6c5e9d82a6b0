//! Descriptor header/record model and the role-aware field routing used by
//! `SQLGetDescField`/`SQLSetDescField`/`SQLCopyDesc`.

use crate::errors::ODBCError;
use crate::handles::definitions::Descriptor;
use cstr::input_text_to_string_a;
use definitions::{
    datetime_interval_code, interval_type_for_code, AllocType, Desc, Integer, Len, Pointer,
    SmallInt, SqlDataType, ULen, USmallInt, SQL_CODE_DATE, SQL_CODE_TIME, SQL_CODE_TIMESTAMP,
    SQL_NAMED, SQL_UNNAMED,
};
use duckdb_odbc_core::type_info::find_data_types;

#[derive(Debug)]
pub struct DescHeader {
    pub alloc_type: AllocType,
    /// Rows per fetch (ARD) or parameter sets per execute (APD).
    pub array_size: ULen,
    pub array_status_ptr: *mut USmallInt,
    pub bind_offset_ptr: *mut Len,
    /// 0 is column-wise binding; a positive value is the row-wise stride.
    pub bind_type: ULen,
    pub count: SmallInt,
    pub rows_processed_ptr: *mut ULen,
}

impl DescHeader {
    fn new(alloc_type: AllocType) -> Self {
        DescHeader {
            alloc_type,
            array_size: 1,
            array_status_ptr: std::ptr::null_mut(),
            bind_offset_ptr: std::ptr::null_mut(),
            bind_type: 0,
            count: 0,
            rows_processed_ptr: std::ptr::null_mut(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DescRecord {
    pub concise_type: SmallInt,
    pub sql_type: SmallInt,
    pub datetime_interval_code: SmallInt,
    pub datetime_interval_precision: Integer,
    pub precision: SmallInt,
    pub scale: SmallInt,
    pub length: ULen,
    pub octet_length: Len,
    pub display_size: Len,
    pub num_prec_radix: Integer,
    pub nullable: SmallInt,
    pub case_sensitive: bool,
    pub unsigned: bool,
    pub searchable: Integer,
    pub fixed_prec_scale: bool,
    pub auto_unique_value: bool,
    pub updatable: Integer,
    pub rowver: bool,
    pub literal_prefix: String,
    pub literal_suffix: String,
    pub local_type_name: String,
    pub type_name: String,
    pub base_column_name: String,
    pub base_table_name: String,
    pub table_name: String,
    pub schema_name: String,
    pub catalog_name: String,
    pub label: String,
    pub name: String,
    pub unnamed: SmallInt,
    pub parameter_type: SmallInt,
    pub data_ptr: Pointer,
    pub indicator_ptr: *mut Len,
    pub octet_length_ptr: *mut Len,
}

impl Default for DescRecord {
    fn default() -> Self {
        DescRecord {
            concise_type: SqlDataType::SQL_VARCHAR as i16,
            sql_type: SqlDataType::SQL_VARCHAR as i16,
            datetime_interval_code: 0,
            datetime_interval_precision: 0,
            precision: 0,
            scale: 0,
            length: 0,
            octet_length: 0,
            display_size: 0,
            num_prec_radix: 0,
            nullable: definitions::Nullability::SQL_NULLABLE as i16,
            case_sensitive: false,
            unsigned: false,
            searchable: definitions::SQL_PRED_BASIC,
            fixed_prec_scale: false,
            auto_unique_value: false,
            updatable: definitions::SQL_ATTR_READONLY,
            rowver: false,
            literal_prefix: String::new(),
            literal_suffix: String::new(),
            local_type_name: String::new(),
            type_name: String::new(),
            base_column_name: String::new(),
            base_table_name: String::new(),
            table_name: String::new(),
            schema_name: String::new(),
            catalog_name: String::new(),
            label: String::new(),
            name: String::new(),
            unnamed: SQL_UNNAMED,
            parameter_type: definitions::ParamType::SQL_PARAM_INPUT as i16,
            data_ptr: std::ptr::null_mut(),
            indicator_ptr: std::ptr::null_mut(),
            octet_length_ptr: std::ptr::null_mut(),
        }
    }
}

impl DescRecord {
    /// Resolve a concise SQL type against the type registry and populate
    /// the defaults of the matching canonical row. Fails with the record
    /// untouched when the registry has no such type.
    pub fn set_sql_type_checked(&mut self, sql_type: SmallInt) -> Result<(), ODBCError> {
        let infos = find_data_types(sql_type);
        let Some(info) = infos.first() else {
            return Err(ODBCError::InconsistentDescriptor(sql_type));
        };
        self.concise_type = info.data_type as i16;
        self.sql_type = info.data_type.verbose() as i16;
        self.datetime_interval_code =
            datetime_interval_code(info.data_type).unwrap_or(0);
        self.precision = info.column_size.unwrap_or(0) as i16;
        self.length = info.column_size.unwrap_or(0) as ULen;
        self.datetime_interval_precision = i32::from(info.interval_precision.unwrap_or(0));
        self.literal_prefix = info.literal_prefix.unwrap_or("").to_string();
        self.literal_suffix = info.literal_suffix.unwrap_or("").to_string();
        self.local_type_name = info.local_type_name.unwrap_or("").to_string();
        self.type_name = info.type_name.to_string();
        self.nullable = info.nullable as i16;
        self.case_sensitive = info.case_sensitive;
        self.scale = info.minimum_scale.unwrap_or(0);
        self.searchable = info.searchable;
        self.fixed_prec_scale = info.fixed_prec_scale;
        self.num_prec_radix = info.num_prec_radix.unwrap_or(0);
        self.unsigned = info.unsigned_attribute.unwrap_or(true);
        Ok(())
    }

    /// Validate a verbose-type/subcode combination, rewriting the concise
    /// type accordingly. Fails with the record untouched when the pair is
    /// not in the registry.
    fn set_datetime_interval_code(&mut self, code: SmallInt) -> Result<(), ODBCError> {
        let concise = if self.sql_type == SqlDataType::SQL_DATETIME as i16 {
            match code {
                SQL_CODE_DATE => Some(SqlDataType::SQL_TYPE_DATE),
                SQL_CODE_TIME => Some(SqlDataType::SQL_TYPE_TIME),
                SQL_CODE_TIMESTAMP => Some(SqlDataType::SQL_TYPE_TIMESTAMP),
                _ => None,
            }
        } else if self.sql_type == SqlDataType::SQL_INTERVAL as i16 {
            interval_type_for_code(code)
        } else {
            None
        };
        let Some(concise) = concise else {
            return Err(ODBCError::InconsistentDescriptor(code));
        };
        if find_data_types(concise as i16).is_empty() {
            return Err(ODBCError::InconsistentDescriptor(concise as i16));
        }
        self.concise_type = concise as i16;
        self.datetime_interval_code = code;
        Ok(())
    }
}

#[derive(Debug)]
pub struct DescriptorInfo {
    pub header: DescHeader,
    pub records: Vec<DescRecord>,
}

impl DescriptorInfo {
    pub fn automatic() -> Self {
        DescriptorInfo {
            header: DescHeader::new(AllocType::SQL_DESC_ALLOC_AUTO),
            records: vec![],
        }
    }

    pub fn user_allocated() -> Self {
        DescriptorInfo {
            header: DescHeader::new(AllocType::SQL_DESC_ALLOC_USER),
            records: vec![],
        }
    }

    /// Record at 0-based index, growing the record list (and COUNT) when
    /// the index lies beyond it.
    pub fn record_mut(&mut self, index: usize) -> &mut DescRecord {
        if index >= self.records.len() {
            self.records.resize_with(index + 1, DescRecord::default);
            self.header.count = self.records.len() as SmallInt;
        }
        &mut self.records[index]
    }

    pub fn record(&self, index: usize) -> Option<&DescRecord> {
        self.records.get(index)
    }

    pub fn reset_records(&mut self) {
        self.records.clear();
        self.header.count = 0;
    }
}

/// Value transferred out of `get_desc_field`; the entrypoint picks the
/// output encoding.
#[derive(Debug)]
pub enum DescFieldValue {
    Small(SmallInt),
    Int(Integer),
    Length(Len),
    ULength(ULen),
    Ptr(Pointer),
    Str(String),
}

const READ_ONLY: bool = true;
const WRITABLE: bool = false;

fn invalid_field(field: Desc, read_only: bool) -> ODBCError {
    ODBCError::InvalidDescriptorField(field as i16, read_only)
}

/// Set one descriptor field, enforcing the role routing table.
///
/// # Safety
/// `value_ptr` is dereferenced for numeric and string fields, matching the
/// ODBC calling convention of the reference implementation.
pub unsafe fn set_desc_field(
    desc: &Descriptor,
    rec_number: SmallInt,
    field: Desc,
    value_ptr: Pointer,
    buffer_length: Integer,
) -> Result<(), ODBCError> {
    let mut info = desc.info.write().unwrap();
    let is_implementation = desc.is_implementation();

    // header fields first; they ignore rec_number
    match field {
        Desc::SQL_DESC_ALLOC_TYPE => return Err(invalid_field(field, READ_ONLY)),
        Desc::SQL_DESC_ARRAY_SIZE => {
            if is_implementation {
                return Err(invalid_field(field, WRITABLE));
            }
            let size = *value_ptr.cast::<ULen>();
            if size == 0 {
                return Err(ODBCError::InvalidAttrValue("SQL_DESC_ARRAY_SIZE".into()));
            }
            info.header.array_size = size;
            return Ok(());
        }
        Desc::SQL_DESC_ARRAY_STATUS_PTR => {
            info.header.array_status_ptr = value_ptr.cast::<USmallInt>();
            return Ok(());
        }
        Desc::SQL_DESC_BIND_OFFSET_PTR => {
            if is_implementation {
                return Err(invalid_field(field, WRITABLE));
            }
            info.header.bind_offset_ptr = value_ptr.cast::<Len>();
            return Ok(());
        }
        Desc::SQL_DESC_BIND_TYPE => {
            if is_implementation {
                return Err(invalid_field(field, WRITABLE));
            }
            info.header.bind_type = *value_ptr.cast::<Integer>() as ULen;
            return Ok(());
        }
        Desc::SQL_DESC_COUNT => {
            if desc.is_ird() {
                return Err(invalid_field(field, WRITABLE));
            }
            let count = *value_ptr.cast::<SmallInt>();
            info.records
                .resize_with(count.max(0) as usize, DescRecord::default);
            info.header.count = count.max(0);
            return Ok(());
        }
        Desc::SQL_DESC_ROWS_PROCESSED_PTR => {
            if !is_implementation {
                return Err(invalid_field(field, WRITABLE));
            }
            info.header.rows_processed_ptr = value_ptr.cast::<ULen>();
            return Ok(());
        }
        _ => {}
    }

    if rec_number <= 0 {
        return Err(ODBCError::InvalidDescriptorIndex(i32::from(rec_number)));
    }
    let rec_index = (rec_number - 1) as usize;

    match field {
        // read-only on every role
        Desc::SQL_DESC_AUTO_UNIQUE_VALUE
        | Desc::SQL_DESC_BASE_COLUMN_NAME
        | Desc::SQL_DESC_BASE_TABLE_NAME
        | Desc::SQL_DESC_CASE_SENSITIVE
        | Desc::SQL_DESC_CATALOG_NAME
        | Desc::SQL_DESC_DISPLAY_SIZE
        | Desc::SQL_DESC_FIXED_PREC_SCALE
        | Desc::SQL_DESC_LABEL
        | Desc::SQL_DESC_LITERAL_PREFIX
        | Desc::SQL_DESC_LITERAL_SUFFIX
        | Desc::SQL_DESC_NULLABLE
        | Desc::SQL_DESC_ROWVER
        | Desc::SQL_DESC_SCHEMA_NAME
        | Desc::SQL_DESC_SEARCHABLE
        | Desc::SQL_DESC_TABLE_NAME
        | Desc::SQL_DESC_TYPE_NAME
        | Desc::SQL_DESC_UPDATABLE => Err(invalid_field(field, READ_ONLY)),
        Desc::SQL_DESC_CONCISE_TYPE => {
            if desc.is_ird() {
                return Err(invalid_field(field, READ_ONLY));
            }
            let sql_type = *value_ptr.cast::<SmallInt>();
            let record = info.record_mut(rec_index);
            record.concise_type = sql_type;
            record.sql_type = sql_data_type_from_i16(sql_type)
                .map_or(sql_type, |t| t.verbose() as i16);
            record.datetime_interval_code = sql_data_type_from_i16(sql_type)
                .and_then(datetime_interval_code)
                .unwrap_or(0);
            Ok(())
        }
        Desc::SQL_DESC_TYPE => {
            if desc.is_ird() {
                return Err(invalid_field(field, READ_ONLY));
            }
            let sql_type = *value_ptr.cast::<SmallInt>();
            info.record_mut(rec_index).set_sql_type_checked(sql_type)
        }
        Desc::SQL_DESC_DATETIME_INTERVAL_CODE => {
            if desc.is_ird() {
                return Err(invalid_field(field, READ_ONLY));
            }
            let code = *value_ptr.cast::<SmallInt>();
            info.record_mut(rec_index).set_datetime_interval_code(code)
        }
        Desc::SQL_DESC_DATETIME_INTERVAL_PRECISION => {
            if desc.is_ird() {
                return Err(invalid_field(field, READ_ONLY));
            }
            info.record_mut(rec_index).datetime_interval_precision =
                *value_ptr.cast::<Integer>();
            Ok(())
        }
        Desc::SQL_DESC_LENGTH => {
            if desc.is_ird() {
                return Err(invalid_field(field, READ_ONLY));
            }
            info.record_mut(rec_index).length = *value_ptr.cast::<ULen>();
            Ok(())
        }
        Desc::SQL_DESC_NUM_PREC_RADIX => {
            if desc.is_ird() {
                return Err(invalid_field(field, READ_ONLY));
            }
            info.record_mut(rec_index).num_prec_radix = *value_ptr.cast::<Integer>();
            Ok(())
        }
        Desc::SQL_DESC_OCTET_LENGTH => {
            if desc.is_ird() {
                return Err(invalid_field(field, READ_ONLY));
            }
            info.record_mut(rec_index).octet_length = *value_ptr.cast::<Len>();
            Ok(())
        }
        Desc::SQL_DESC_PRECISION => {
            if desc.is_ird() {
                return Err(invalid_field(field, READ_ONLY));
            }
            info.record_mut(rec_index).precision = *value_ptr.cast::<SmallInt>();
            Ok(())
        }
        Desc::SQL_DESC_SCALE => {
            if desc.is_ird() {
                return Err(invalid_field(field, READ_ONLY));
            }
            info.record_mut(rec_index).scale = *value_ptr.cast::<SmallInt>();
            Ok(())
        }
        Desc::SQL_DESC_UNSIGNED => {
            if desc.is_ird() {
                return Err(invalid_field(field, READ_ONLY));
            }
            info.record_mut(rec_index).unsigned = *value_ptr.cast::<SmallInt>() != 0;
            Ok(())
        }
        Desc::SQL_DESC_LOCAL_TYPE_NAME => {
            if desc.is_ird() {
                return Err(invalid_field(field, READ_ONLY));
            }
            info.record_mut(rec_index).local_type_name =
                input_text_to_string_a(value_ptr.cast(), buffer_length as isize);
            Ok(())
        }
        Desc::SQL_DESC_NAME => {
            if !desc.is_ipd() {
                return Err(invalid_field(field, READ_ONLY));
            }
            let record = info.record_mut(rec_index);
            record.name = input_text_to_string_a(value_ptr.cast(), buffer_length as isize);
            record.unnamed = if record.name.is_empty() {
                SQL_UNNAMED
            } else {
                SQL_NAMED
            };
            Ok(())
        }
        Desc::SQL_DESC_UNNAMED => {
            if !desc.is_ipd() {
                return Err(invalid_field(field, READ_ONLY));
            }
            info.record_mut(rec_index).unnamed = *value_ptr.cast::<SmallInt>();
            Ok(())
        }
        Desc::SQL_DESC_PARAMETER_TYPE => {
            if !desc.is_ipd() {
                return Err(invalid_field(field, READ_ONLY));
            }
            info.record_mut(rec_index).parameter_type = *value_ptr.cast::<SmallInt>();
            Ok(())
        }
        Desc::SQL_DESC_DATA_PTR => {
            if is_implementation {
                return Err(invalid_field(field, READ_ONLY));
            }
            info.record_mut(rec_index).data_ptr = value_ptr;
            Ok(())
        }
        Desc::SQL_DESC_INDICATOR_PTR => {
            if is_implementation {
                return Err(invalid_field(field, READ_ONLY));
            }
            info.record_mut(rec_index).indicator_ptr = value_ptr.cast::<Len>();
            Ok(())
        }
        Desc::SQL_DESC_OCTET_LENGTH_PTR => {
            if is_implementation {
                return Err(invalid_field(field, READ_ONLY));
            }
            info.record_mut(rec_index).octet_length_ptr = value_ptr.cast::<Len>();
            Ok(())
        }
        _ => Err(invalid_field(field, WRITABLE)),
    }
}

/// Read one descriptor field.
pub fn get_desc_field(
    desc: &Descriptor,
    rec_number: SmallInt,
    field: Desc,
) -> Result<DescFieldValue, ODBCError> {
    let info = desc.info.read().unwrap();

    match field {
        Desc::SQL_DESC_ALLOC_TYPE => {
            return Ok(DescFieldValue::Small(info.header.alloc_type as i16))
        }
        Desc::SQL_DESC_ARRAY_SIZE => return Ok(DescFieldValue::ULength(info.header.array_size)),
        Desc::SQL_DESC_ARRAY_STATUS_PTR => {
            return Ok(DescFieldValue::Ptr(info.header.array_status_ptr.cast()))
        }
        Desc::SQL_DESC_BIND_OFFSET_PTR => {
            return Ok(DescFieldValue::Ptr(info.header.bind_offset_ptr.cast()))
        }
        Desc::SQL_DESC_BIND_TYPE => {
            return Ok(DescFieldValue::Int(info.header.bind_type as Integer))
        }
        Desc::SQL_DESC_COUNT => return Ok(DescFieldValue::Small(info.header.count)),
        Desc::SQL_DESC_ROWS_PROCESSED_PTR => {
            return Ok(DescFieldValue::Ptr(info.header.rows_processed_ptr.cast()))
        }
        _ => {}
    }

    if rec_number <= 0 {
        return Err(ODBCError::InvalidDescriptorIndex(i32::from(rec_number)));
    }
    let Some(record) = info.record((rec_number - 1) as usize) else {
        return Err(ODBCError::InvalidDescriptorIndex(i32::from(rec_number)));
    };

    let value = match field {
        Desc::SQL_DESC_AUTO_UNIQUE_VALUE => DescFieldValue::Int(Integer::from(record.auto_unique_value)),
        Desc::SQL_DESC_BASE_COLUMN_NAME => DescFieldValue::Str(record.base_column_name.clone()),
        Desc::SQL_DESC_BASE_TABLE_NAME => DescFieldValue::Str(record.base_table_name.clone()),
        Desc::SQL_DESC_CASE_SENSITIVE => DescFieldValue::Int(Integer::from(record.case_sensitive)),
        Desc::SQL_DESC_CATALOG_NAME => DescFieldValue::Str(record.catalog_name.clone()),
        Desc::SQL_DESC_CONCISE_TYPE => DescFieldValue::Small(record.concise_type),
        Desc::SQL_DESC_DATETIME_INTERVAL_CODE => {
            DescFieldValue::Small(record.datetime_interval_code)
        }
        Desc::SQL_DESC_DATETIME_INTERVAL_PRECISION => {
            DescFieldValue::Int(record.datetime_interval_precision)
        }
        Desc::SQL_DESC_DATA_PTR => DescFieldValue::Ptr(record.data_ptr),
        Desc::SQL_DESC_DISPLAY_SIZE => DescFieldValue::Length(record.display_size),
        Desc::SQL_DESC_FIXED_PREC_SCALE => {
            DescFieldValue::Small(SmallInt::from(record.fixed_prec_scale))
        }
        Desc::SQL_DESC_INDICATOR_PTR => DescFieldValue::Ptr(record.indicator_ptr.cast()),
        Desc::SQL_DESC_LABEL => DescFieldValue::Str(record.label.clone()),
        Desc::SQL_DESC_LENGTH => DescFieldValue::ULength(record.length),
        Desc::SQL_DESC_LITERAL_PREFIX => DescFieldValue::Str(record.literal_prefix.clone()),
        Desc::SQL_DESC_LITERAL_SUFFIX => DescFieldValue::Str(record.literal_suffix.clone()),
        Desc::SQL_DESC_LOCAL_TYPE_NAME => DescFieldValue::Str(record.local_type_name.clone()),
        Desc::SQL_DESC_NAME => DescFieldValue::Str(record.name.clone()),
        Desc::SQL_DESC_NULLABLE => DescFieldValue::Small(record.nullable),
        Desc::SQL_DESC_NUM_PREC_RADIX => DescFieldValue::Int(record.num_prec_radix),
        Desc::SQL_DESC_OCTET_LENGTH => DescFieldValue::Length(record.octet_length),
        Desc::SQL_DESC_OCTET_LENGTH_PTR => DescFieldValue::Ptr(record.octet_length_ptr.cast()),
        Desc::SQL_DESC_PARAMETER_TYPE => DescFieldValue::Small(record.parameter_type),
        Desc::SQL_DESC_PRECISION => DescFieldValue::Small(record.precision),
        Desc::SQL_DESC_ROWVER => DescFieldValue::Small(SmallInt::from(record.rowver)),
        Desc::SQL_DESC_SCALE => DescFieldValue::Small(record.scale),
        Desc::SQL_DESC_SCHEMA_NAME => DescFieldValue::Str(record.schema_name.clone()),
        Desc::SQL_DESC_SEARCHABLE => DescFieldValue::Int(record.searchable),
        Desc::SQL_DESC_TABLE_NAME => DescFieldValue::Str(record.table_name.clone()),
        Desc::SQL_DESC_TYPE => DescFieldValue::Small(record.sql_type),
        Desc::SQL_DESC_TYPE_NAME => DescFieldValue::Str(record.type_name.clone()),
        Desc::SQL_DESC_UNNAMED => DescFieldValue::Small(record.unnamed),
        Desc::SQL_DESC_UNSIGNED => DescFieldValue::Small(SmallInt::from(record.unsigned)),
        Desc::SQL_DESC_UPDATABLE => DescFieldValue::Int(record.updatable),
        _ => return Err(invalid_field(field, WRITABLE)),
    };
    Ok(value)
}

/// `SQLCopyDesc`: copy header and records; the destination keeps its own
/// allocation type.
pub fn copy_desc(src: &Descriptor, dst: &Descriptor) -> Result<(), ODBCError> {
    if dst.is_ird() {
        return Err(ODBCError::ReadOnlyAttr("IRD cannot be a CopyDesc target"));
    }
    let src_info = src.info.read().unwrap();
    let mut dst_info = dst.info.write().unwrap();
    let alloc_type = dst_info.header.alloc_type;
    dst_info.header = DescHeader {
        alloc_type,
        array_size: src_info.header.array_size,
        array_status_ptr: src_info.header.array_status_ptr,
        bind_offset_ptr: src_info.header.bind_offset_ptr,
        bind_type: src_info.header.bind_type,
        count: src_info.header.count,
        rows_processed_ptr: src_info.header.rows_processed_ptr,
    };
    dst_info.records = src_info.records.clone();
    Ok(())
}

fn sql_data_type_from_i16(v: i16) -> Option<SqlDataType> {
    <SqlDataType as num_traits::FromPrimitive>::from_i16(v)
}
