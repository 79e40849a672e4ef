//! SOQL query building with value escaping.
//!
//! [`QueryBuilder`] accumulates clauses through a fluent interface and
//! compiles them into one SOQL statement with [`QueryBuilder::to_sql`].
//! String values are escaped and field names are validated, so user input
//! cannot change the shape of the statement. The first invalid field name is
//! reported when the statement is compiled.
//!
//! # Example
//!
//! ```rust
//! use salesforce_model::rest::QueryBuilder;
//!
//! let sql = QueryBuilder::new("Account")
//!     .select(["Id", "Name"])
//!     .where_eq("Name", "O'Brien")
//!     .order_by("Name", true)
//!     .limit(10)
//!     .to_sql()
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT Id, Name FROM Account WHERE Name = 'O\\'Brien' ORDER BY Name ASC LIMIT 10"
//! );
//! ```

use crate::rest::ResourceError;

/// SOQL escaping and identifier validation.
pub mod soql {
    /// Escapes a value for use inside a SOQL string literal.
    ///
    /// ```rust
    /// use salesforce_model::rest::soql;
    ///
    /// assert_eq!(soql::escape_string("O'Brien & Co."), "O\\'Brien & Co.");
    /// ```
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 8);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Escapes a value for use in a `LIKE` pattern, including the `%` and `_` wildcards.
    #[must_use]
    pub fn escape_like(value: &str) -> String {
        let base = escape_string(value);
        let mut escaped = String::with_capacity(base.len() + 4);
        for ch in base.chars() {
            match ch {
                '%' => escaped.push_str("\\%"),
                '_' => escaped.push_str("\\_"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Returns `true` if `name` is a safe SOQL identifier.
    ///
    /// Each dot-separated segment must start with an ASCII letter and
    /// contain only ASCII letters, digits and underscores, which admits
    /// custom fields (`Tier__c`) and relationship paths (`Account.Name`).
    ///
    /// ```rust
    /// use salesforce_model::rest::soql;
    ///
    /// assert!(soql::is_safe_field_name("Custom_Field__c"));
    /// assert!(soql::is_safe_field_name("Account.Owner.Name"));
    /// assert!(!soql::is_safe_field_name("Name' OR Name != '"));
    /// ```
    #[must_use]
    pub fn is_safe_field_name(name: &str) -> bool {
        !name.is_empty() && name.split('.').all(is_safe_segment)
    }

    fn is_safe_segment(segment: &str) -> bool {
        let mut chars = segment.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

/// Fluent SOQL statement builder bound to one object.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct QueryBuilder {
    object: String,
    fields: Vec<String>,
    conditions: Vec<String>,
    order_by: Vec<String>,
    limit: Option<u32>,
    offset: Option<u32>,
    invalid_field: Option<String>,
}

impl QueryBuilder {
    /// Creates a builder selecting from `object`.
    pub fn new(object: impl Into<String>) -> Self {
        let object = object.into();
        let invalid_field = (!soql::is_safe_field_name(&object)).then(|| object.clone());
        Self {
            object,
            fields: Vec::new(),
            conditions: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            invalid_field,
        }
    }

    /// Returns the object this builder selects from.
    #[must_use]
    pub fn object(&self) -> &str {
        &self.object
    }

    /// Adds fields to the `SELECT` list.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            let field = field.into();
            if self.check_field(&field) && !self.fields.contains(&field) {
                self.fields.push(field);
            }
        }
        self
    }

    /// Adds `field = 'value'`.
    pub fn where_eq(self, field: impl Into<String>, value: impl AsRef<str>) -> Self {
        let value = soql::escape_string(value.as_ref());
        self.condition(field.into(), |f| format!("{f} = '{value}'"))
    }

    /// Adds `field != 'value'`.
    pub fn where_ne(self, field: impl Into<String>, value: impl AsRef<str>) -> Self {
        let value = soql::escape_string(value.as_ref());
        self.condition(field.into(), |f| format!("{f} != '{value}'"))
    }

    /// Adds `field LIKE '%value%'` with wildcards in `value` escaped.
    pub fn where_like(self, field: impl Into<String>, value: impl AsRef<str>) -> Self {
        let value = soql::escape_like(value.as_ref());
        self.condition(field.into(), |f| format!("{f} LIKE '%{value}%'"))
    }

    /// Adds `field IN ('a', 'b', ...)`.
    pub fn where_in<I, S>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<String> = values
            .into_iter()
            .map(|v| format!("'{}'", soql::escape_string(v.as_ref())))
            .collect();
        self.condition(field.into(), |f| format!("{f} IN ({})", values.join(", ")))
    }

    /// Adds a condition verbatim. The condition is not escaped.
    pub fn where_raw(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Adds an `ORDER BY` term.
    pub fn order_by(mut self, field: impl Into<String>, ascending: bool) -> Self {
        let field = field.into();
        if self.check_field(&field) {
            let direction = if ascending { "ASC" } else { "DESC" };
            self.order_by.push(format!("{field} {direction}"));
        }
        self
    }

    /// Sets `LIMIT`.
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets `OFFSET`.
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Compiles the statement. Selects `Id` when no field was selected.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidFieldName`] for the first invalid
    /// object or field name given to the builder.
    pub fn to_sql(&self) -> Result<String, ResourceError> {
        if let Some(field) = &self.invalid_field {
            return Err(ResourceError::InvalidFieldName {
                field: field.clone(),
            });
        }

        let fields = if self.fields.is_empty() {
            "Id".to_string()
        } else {
            self.fields.join(", ")
        };
        let mut sql = format!("SELECT {fields} FROM {}", self.object);

        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }
        Ok(sql)
    }

    fn condition(mut self, field: String, render: impl FnOnce(&str) -> String) -> Self {
        if self.check_field(&field) {
            self.conditions.push(render(&field));
        }
        self
    }

    fn check_field(&mut self, field: &str) -> bool {
        if soql::is_safe_field_name(field) {
            return true;
        }
        if self.invalid_field.is_none() {
            self.invalid_field = Some(field.to_string());
        }
        false
    }
}
