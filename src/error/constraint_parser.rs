use std::sync::OnceLock;

use regex::Regex;

/// Extracts entity/field/value triples from PostgreSQL constraint violations.
///
/// PostgreSQL puts the offending key in the DETAIL line
/// (`Key (title)=(Plumbing) already exists.`) and names the table in the
/// primary message. Table names in this schema contain underscores
/// (`sub_sub_category`), so constraint names are only split after the
/// column is known.
pub struct ConstraintParser;

struct Patterns {
    key_value: Regex,
    column: Regex,
    table: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid key/value pattern"),
        column: Regex::new(r#"column "([^"]+)""#).expect("valid column pattern"),
        table: Regex::new(r#"(?:table|relation) "([^"]+)""#).expect("valid table pattern"),
    })
}

impl ConstraintParser {
    /// Parses a unique violation into `(entity, field, value)`.
    pub fn parse_unique_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let (field, value) = Self::key_value(message, details)?;
        let entity = constraint_name
            .and_then(|c| Self::entity_from_constraint(c, &field, "_key"))
            .or_else(|| Self::table(message))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a foreign key violation into `(referencing table, field, value)`.
    pub fn parse_foreign_key_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let (field, value) = Self::key_value(message, details)?;
        let entity = constraint_name
            .and_then(|c| Self::entity_from_constraint(c, &field, "_fkey"))
            .or_else(|| Self::table(message))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a not-null violation into `(entity, field)`.
    pub fn parse_not_null_violation(message: &str) -> Option<(String, String)> {
        let field = patterns()
            .column
            .captures(message)?
            .get(1)?
            .as_str()
            .to_string();
        let entity = Self::table(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Parses a check violation into `(entity, constraint)`.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let constraint = constraint_name?;
        let entity = Self::table(message).unwrap_or_else(|| "resource".to_string());
        let field = constraint
            .strip_prefix(&format!("{entity}_"))
            .and_then(|rest| rest.strip_suffix("_check"))
            .unwrap_or(constraint)
            .to_string();
        Some((entity, field))
    }

    fn key_value(message: &str, details: Option<&str>) -> Option<(String, String)> {
        [details.unwrap_or_default(), message]
            .into_iter()
            .find_map(|text| {
                let caps = patterns().key_value.captures(text)?;
                Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
            })
    }

    fn table(message: &str) -> Option<String> {
        patterns()
            .table
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// `services_title_key` with field `title` and suffix `_key` -> `services`
    fn entity_from_constraint(constraint: &str, field: &str, suffix: &str) -> Option<String> {
        constraint
            .strip_suffix(suffix)?
            .strip_suffix(field)?
            .strip_suffix('_')
            .filter(|entity| !entity.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_from_details() {
        let result = ConstraintParser::parse_unique_violation(
            "duplicate key value violates unique constraint \"services_title_key\"",
            Some("Key (title)=(Plumbing) already exists."),
            Some("services_title_key"),
        );
        assert_eq!(
            result,
            Some((
                "services".to_string(),
                "title".to_string(),
                "Plumbing".to_string()
            ))
        );
    }

    #[test]
    fn test_unique_violation_detail_inline_in_message() {
        let message = "duplicate key value violates unique constraint \"services_title_key\"\nDETAIL: Key (title)=(Eletricista) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, None, None);
        assert_eq!(
            result,
            Some((
                "resource".to_string(),
                "title".to_string(),
                "Eletricista".to_string()
            ))
        );
    }

    #[test]
    fn test_foreign_key_with_underscored_table() {
        let result = ConstraintParser::parse_foreign_key_violation(
            "insert or update on table \"sub_sub_category\" violates foreign key constraint \"sub_sub_category_sub_category_id_fkey\"",
            Some("Key (sub_category_id)=(7b0c4c39-6f0e-4d55-9d0c-4c2c8a5d2f10) is not present in table \"sub_category\"."),
            Some("sub_sub_category_sub_category_id_fkey"),
        );
        assert_eq!(
            result,
            Some((
                "sub_sub_category".to_string(),
                "sub_category_id".to_string(),
                "7b0c4c39-6f0e-4d55-9d0c-4c2c8a5d2f10".to_string()
            ))
        );
    }

    #[test]
    fn test_not_null_violation() {
        let result = ConstraintParser::parse_not_null_violation(
            "null value in column \"title_en\" of relation \"services\" violates not-null constraint",
        );
        assert_eq!(
            result,
            Some(("services".to_string(), "title_en".to_string()))
        );
    }

    #[test]
    fn test_check_violation() {
        let result = ConstraintParser::parse_check_violation(
            "new row for relation \"services\" violates check constraint \"services_title_check\"",
            Some("services_title_check"),
        );
        assert_eq!(result, Some(("services".to_string(), "title".to_string())));
    }

    #[test]
    fn test_unparseable_message() {
        assert_eq!(
            ConstraintParser::parse_unique_violation("something else", None, None),
            None
        );
    }
}
