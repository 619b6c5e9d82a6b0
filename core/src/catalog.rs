//! SQL composition for the catalog functions. `SQLTables` reads from
//! information_schema.tables, `SQLColumns` from duckdb_columns; both use
//! the same pattern-filter rule.

use once_cell::sync::Lazy;
use regex::Regex;

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^(".*"|'.*')$"#).unwrap());
static INNER_BLANKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ +| +$|( ) +").unwrap());
static TRAILING_BLANKS: Lazy<Regex> = Lazy::new(|| Regex::new(r" +$|( ) +").unwrap());

/// Treat a filter value as an identifier per SQL_ATTR_METADATA_ID: quoted
/// identifiers lose their quotes and inner whitespace runs, bare ones are
/// trimmed and upcased.
pub fn string_as_identifier(s: &str) -> String {
    if QUOTED.is_match(s) {
        let unquoted = &s[1..s.len() - 1];
        INNER_BLANKS.replace_all(unquoted, "$1").into_owned()
    } else {
        TRAILING_BLANKS
            .replace_all(s, "$1")
            .to_uppercase()
    }
}

/// Build one catalog filter predicate. Empty patterns match everything
/// (including NULL fields); under metadata-id the value is an identifier
/// compared for equality; otherwise ODBC wildcards apply with an explicit
/// backslash escape for the Power Query SDK.
pub fn parse_string_filter(
    filter_name: &str,
    filter_value: &str,
    metadata_id: bool,
    coalesce_str: &str,
) -> String {
    let mut filter = if filter_value.is_empty() {
        if coalesce_str.is_empty() {
            format!("COALESCE({filter_name},'') LIKE '%'")
        } else {
            format!("COALESCE({filter_name},'{coalesce_str}') LIKE '{coalesce_str}'")
        }
    } else if metadata_id {
        format!("{filter_name}='{}'", string_as_identifier(filter_value))
    } else {
        format!("{filter_name} LIKE '{filter_value}'")
    };
    filter.push_str(" ESCAPE '\\'");
    filter
}

/// Translate the ODBC table-type list into engine table types. Unknown
/// kinds such as SYSTEM TABLE are stripped.
pub fn table_type_filter(table_type: &str) -> Option<String> {
    if table_type.is_empty() || table_type == "%" {
        return None;
    }
    let translated: Vec<&str> = table_type
        .split(',')
        .map(|t| t.trim().trim_matches('\'').trim())
        .filter_map(|t| match t.to_uppercase().as_str() {
            "TABLE" | "BASE TABLE" => Some("'BASE TABLE'"),
            "VIEW" => Some("'VIEW'"),
            "LOCAL TEMPORARY" => Some("'LOCAL TEMPORARY'"),
            _ => None,
        })
        .collect();
    if translated.is_empty() {
        // nothing valid remains; match no rows rather than all of them
        return Some("''".to_string());
    }
    Some(translated.join(", "))
}

/// True when the arguments select the catalog-list sentinel form of
/// `SQLTables`.
fn is_all_catalogs(catalog: &str, schema: &str, table: &str) -> bool {
    catalog == "%" && schema.is_empty() && table.is_empty()
}

fn is_all_schemas(catalog: &str, schema: &str, table: &str) -> bool {
    schema == "%" && catalog.is_empty() && table.is_empty()
}

fn is_all_table_types(catalog: &str, schema: &str, table: &str, table_type: &str) -> bool {
    catalog.is_empty() && schema.is_empty() && table.is_empty() && table_type == "%"
}

/// Compose the `SQLTables` query.
pub fn tables_query(
    catalog: &str,
    schema: &str,
    table: &str,
    table_type: &str,
    metadata_id: bool,
) -> String {
    if is_all_catalogs(catalog, schema, table) {
        return "SELECT DISTINCT catalog_name::VARCHAR \"TABLE_CAT\", NULL::VARCHAR \"TABLE_SCHEM\", \
                NULL::VARCHAR \"TABLE_NAME\", NULL::VARCHAR \"TABLE_TYPE\", NULL::VARCHAR \"REMARKS\" \
                FROM information_schema.schemata ORDER BY \"TABLE_CAT\""
            .to_string();
    }
    if is_all_schemas(catalog, schema, table) {
        return "SELECT DISTINCT NULL::VARCHAR \"TABLE_CAT\", schema_name::VARCHAR \"TABLE_SCHEM\", \
                NULL::VARCHAR \"TABLE_NAME\", NULL::VARCHAR \"TABLE_TYPE\", NULL::VARCHAR \"REMARKS\" \
                FROM information_schema.schemata ORDER BY \"TABLE_SCHEM\""
            .to_string();
    }
    if is_all_table_types(catalog, schema, table, table_type) {
        return "SELECT NULL::VARCHAR \"TABLE_CAT\", NULL::VARCHAR \"TABLE_SCHEM\", \
                NULL::VARCHAR \"TABLE_NAME\", t.\"TABLE_TYPE\", NULL::VARCHAR \"REMARKS\" \
                FROM (VALUES ('TABLE'), ('VIEW')) t(\"TABLE_TYPE\")"
            .to_string();
    }

    let catalog_filter = parse_string_filter("table_catalog", catalog, metadata_id, "");
    let schema_filter = parse_string_filter("table_schema", schema, metadata_id, "");
    let table_filter = parse_string_filter("table_name", table, metadata_id, "");

    let mut sql = String::from(
        "SELECT \
         table_catalog::VARCHAR \"TABLE_CAT\", \
         table_schema::VARCHAR \"TABLE_SCHEM\", \
         table_name::VARCHAR \"TABLE_NAME\", \
         CASE WHEN table_type='BASE TABLE' THEN 'TABLE'::VARCHAR ELSE table_type::VARCHAR END \"TABLE_TYPE\", \
         ''::VARCHAR \"REMARKS\" \
         FROM information_schema.tables",
    );
    sql.push_str(&format!(
        " WHERE {catalog_filter}\n AND {schema_filter}\n AND {table_filter}"
    ));
    if let Some(types) = table_type_filter(table_type) {
        sql.push_str(&format!("\n AND table_type IN ({types}) "));
    }
    sql.push_str("\n AND table_catalog NOT LIKE '__ducklake_%' ");
    sql.push_str("\n ORDER BY TABLE_TYPE, TABLE_CATALOG, TABLE_SCHEMA, TABLE_NAME");
    sql
}

/// Compose the `SQLColumns` query over duckdb_columns.
pub fn columns_query(
    catalog: &str,
    schema: &str,
    table: &str,
    column: &str,
    metadata_id: bool,
) -> String {
    let catalog_filter = parse_string_filter("\"TABLE_CAT\"", catalog, metadata_id, "memory");
    let schema_filter = parse_string_filter("\"TABLE_SCHEM\"", schema, metadata_id, "");
    let table_filter = parse_string_filter("\"TABLE_NAME\"", table, metadata_id, "");
    let column_filter = parse_string_filter("\"COLUMN_NAME\"", column, metadata_id, "");

    let mut sql = String::from(
        r#"
        SELECT * EXCLUDE (mapping, data_type_no_typmod)
        FROM (
            SELECT database_name::VARCHAR AS "TABLE_CAT",
            schema_name AS "TABLE_SCHEM",
            table_name AS "TABLE_NAME",
            column_name AS "COLUMN_NAME",
            MAP {
                'BOOLEAN': -7,
                'TINYINT': -6,
                'UTINYINT': -6,
                'SMALLINT': 5,
                'USMALLINT': 5,
                'INTEGER': 4,
                'UINTEGER': 4,
                'BIGINT': -5,
                'UBIGINT': -5,
                'HUGEINT': 2,
                'FLOAT': 6,
                'DOUBLE': 8,
                'DATE': 91,
                'TIME': 92,
                'VARCHAR': 12,
                'BLOB': -3,
                'INTERVAL': 10,
                'DECIMAL': 2
            } AS mapping,
            STRING_SPLIT(data_type, '(')[1] AS data_type_no_typmod,
            CASE
                WHEN data_type LIKE 'TIMESTAMP%' THEN 93::SMALLINT
                WHEN mapping[data_type_no_typmod] IS NOT NULL THEN mapping[data_type_no_typmod]::SMALLINT
                ELSE data_type_id::SMALLINT
            END AS "DATA_TYPE",
            CASE
                WHEN data_type_no_typmod = 'DECIMAL' THEN 'NUMERIC'
                WHEN data_type LIKE 'TIMESTAMP%' THEN 'TIMESTAMP'
                ELSE data_type_no_typmod
            END AS "TYPE_NAME",
            CASE
                WHEN data_type='DATE' THEN 12
                WHEN data_type='TIME' THEN 15
                WHEN data_type LIKE 'TIMESTAMP%' THEN 26
                WHEN data_type='BOOLEAN' THEN 1
                WHEN data_type='VARCHAR' OR data_type='BLOB' THEN character_maximum_length
                WHEN data_type LIKE '%INT%' THEN numeric_precision
                WHEN data_type LIKE 'DECIMAL%' THEN numeric_precision
                WHEN data_type='FLOAT' OR data_type='DOUBLE' THEN numeric_precision
                ELSE NULL
            END AS "COLUMN_SIZE",
            CASE
                WHEN data_type='DATE' THEN 4
                WHEN data_type LIKE 'TIMESTAMP%' THEN 8
                WHEN data_type LIKE 'TIME%' THEN 8
                WHEN data_type='BOOLEAN' THEN 1
                WHEN data_type='VARCHAR' OR data_type='BLOB' THEN 16
                WHEN data_type LIKE '%TINYINT' THEN 1
                WHEN data_type LIKE '%SMALLINT' THEN 2
                WHEN data_type LIKE '%INTEGER' THEN 4
                WHEN data_type LIKE '%BIGINT' THEN 8
                WHEN data_type='HUGEINT' THEN 16
                WHEN data_type LIKE 'DECIMAL%' THEN 16
                WHEN data_type='FLOAT' THEN 4
                WHEN data_type='DOUBLE' THEN 8
                ELSE NULL
            END AS "BUFFER_LENGTH",
            numeric_scale::SMALLINT AS "DECIMAL_DIGITS",
            numeric_precision_radix::SMALLINT AS "NUM_PREC_RADIX",
            CASE is_nullable
                WHEN FALSE THEN 0::SMALLINT
                WHEN TRUE THEN 1::SMALLINT
                ELSE 2::SMALLINT
            END AS "NULLABLE",
            '' AS "REMARKS",
            column_default AS "COLUMN_DEF",
            CASE
                WHEN data_type LIKE 'TIMESTAMP%' THEN 9::SMALLINT
                WHEN data_type='DATE' OR data_type='TIME' THEN 9::SMALLINT
                WHEN mapping[data_type_no_typmod] IS NOT NULL THEN mapping[data_type_no_typmod]::SMALLINT
                ELSE data_type_id::SMALLINT
            END AS "SQL_DATA_TYPE",
            CASE
                WHEN data_type='DATE' THEN 1::SMALLINT
                WHEN data_type LIKE 'TIMESTAMP%' THEN 3::SMALLINT
                WHEN data_type LIKE 'TIME%' THEN 2::SMALLINT
                ELSE NULL::SMALLINT
            END AS "SQL_DATETIME_SUB",
            CASE
                WHEN data_type='VARCHAR' OR data_type='BLOB' THEN character_maximum_length
                ELSE NULL
            END AS "CHAR_OCTET_LENGTH",
            column_index AS "ORDINAL_POSITION",
            CASE is_nullable
                WHEN FALSE THEN 'NO'
                WHEN TRUE THEN 'YES'
                ELSE ''
            END AS "IS_NULLABLE"
            FROM duckdb_columns
        )
	"#,
    );
    sql.push_str(&format!(
        " WHERE {catalog_filter} AND {schema_filter} AND {table_filter} AND {column_filter}"
    ));
    sql.push_str(
        "\n ORDER BY \"TABLE_CAT\", \"TABLE_SCHEM\", \"TABLE_NAME\", \"ORDINAL_POSITION\"",
    );
    sql
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bare_identifiers_upcase_and_trim() {
        assert_eq!("MY_TABLE", string_as_identifier("my_table  "));
        assert_eq!("A B", string_as_identifier("a  b"));
    }

    #[test]
    fn quoted_identifiers_keep_case_and_lose_quotes() {
        assert_eq!("my_table", string_as_identifier("\"my_table\""));
        assert_eq!("My Mixed", string_as_identifier("'My  Mixed '"));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(
            "COALESCE(table_name,'') LIKE '%' ESCAPE '\\'",
            parse_string_filter("table_name", "", false, "")
        );
    }

    #[test]
    fn metadata_id_filter_compares_identifiers() {
        assert_eq!(
            "table_name='DUCKS' ESCAPE '\\'",
            parse_string_filter("table_name", "ducks", true, "")
        );
    }

    #[test]
    fn pattern_filter_uses_like() {
        assert_eq!(
            "table_name LIKE 'duck%' ESCAPE '\\'",
            parse_string_filter("table_name", "duck%", false, "")
        );
    }

    #[test]
    fn table_type_translation() {
        assert_eq!(Some("'BASE TABLE'".to_string()), table_type_filter("TABLE"));
        assert_eq!(
            Some("'BASE TABLE', 'VIEW'".to_string()),
            table_type_filter("'TABLE', 'VIEW'")
        );
        // unknown types are stripped; nothing valid left matches no rows
        assert_eq!(Some("''".to_string()), table_type_filter("SYSTEM TABLE"));
        assert_eq!(None, table_type_filter("%"));
        assert_eq!(None, table_type_filter(""));
    }

    #[test]
    fn tables_query_includes_filters() {
        let sql = tables_query("", "ducks", "%", "TABLE", false);
        assert!(sql.contains("COALESCE(table_catalog,'') LIKE '%'"));
        assert!(sql.contains("table_schema LIKE 'ducks'"));
        assert!(sql.contains("table_name LIKE '%'"));
        assert!(sql.contains("table_type IN ('BASE TABLE')"));
        assert!(sql.contains("CASE WHEN table_type='BASE TABLE' THEN 'TABLE'"));
    }

    #[test]
    fn all_catalogs_sentinel() {
        let sql = tables_query("%", "", "", "", false);
        assert!(sql.contains("information_schema.schemata"));
        assert!(sql.contains("DISTINCT catalog_name"));
    }

    #[test]
    fn all_table_types_sentinel() {
        let sql = tables_query("", "", "", "%", false);
        assert!(sql.contains("VALUES ('TABLE'), ('VIEW')"));
    }

    #[test]
    fn columns_query_filters_all_four_levels() {
        let sql = columns_query("", "main", "t%", "", false);
        assert!(sql.contains("duckdb_columns"));
        assert!(sql.contains("\"TABLE_SCHEM\" LIKE 'main'"));
        assert!(sql.contains("\"TABLE_NAME\" LIKE 't%'"));
        assert!(sql.contains("COALESCE(\"COLUMN_NAME\",'') LIKE '%'"));
        assert!(sql.contains("ORDINAL_POSITION"));
    }
}
