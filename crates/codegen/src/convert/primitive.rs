use super::go_string;
use schemagen_spec as spec;

/// `Computed`/`Optional`/`Required` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComputedOptionalRequired(Option<spec::ComputedOptionalRequired>);

impl ComputedOptionalRequired {
    /// Wrap the specification value
    #[must_use]
    pub const fn new(value: Option<spec::ComputedOptionalRequired>) -> Self {
        Self(value)
    }

    /// The specification value, if any
    #[must_use]
    pub const fn value(&self) -> Option<spec::ComputedOptionalRequired> {
        self.0
    }

    /// Schema fragment
    #[must_use]
    pub fn schema(&self) -> String {
        match self.0 {
            Some(spec::ComputedOptionalRequired::Computed) => "Computed: true,\n",
            Some(spec::ComputedOptionalRequired::ComputedOptional) => {
                "Computed: true,\nOptional: true,\n"
            }
            Some(spec::ComputedOptionalRequired::Optional) => "Optional: true,\n",
            Some(spec::ComputedOptionalRequired::Required) => "Required: true,\n",
            None => "",
        }
        .to_string()
    }
}

/// Description, rendered as both plain and markdown description
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Description(Option<String>);

impl Description {
    /// Wrap the specification value
    #[must_use]
    pub fn new(value: Option<&str>) -> Self {
        Self(value.map(str::to_string))
    }

    /// Schema fragment
    #[must_use]
    pub fn schema(&self) -> String {
        self.0.as_deref().map_or_else(String::new, |text| {
            let quoted = go_string(text);
            format!("Description: {quoted},\nMarkdownDescription: {quoted},\n")
        })
    }
}

/// Deprecation message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeprecationMessage(Option<String>);

impl DeprecationMessage {
    /// Wrap the specification value
    #[must_use]
    pub fn new(value: Option<&str>) -> Self {
        Self(value.map(str::to_string))
    }

    /// Schema fragment
    #[must_use]
    pub fn schema(&self) -> String {
        self.0.as_deref().map_or_else(String::new, |text| {
            format!("DeprecationMessage: {},\n", go_string(text))
        })
    }
}

/// Sensitive flag; only `true` renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sensitive(Option<bool>);

impl Sensitive {
    /// Wrap the specification value
    #[must_use]
    pub const fn new(value: Option<bool>) -> Self {
        Self(value)
    }

    /// Schema fragment
    #[must_use]
    pub fn schema(&self) -> String {
        if self.0 == Some(true) {
            "Sensitive: true,\n".to_string()
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_optional_required_schema() {
        let cases = [
            (None, ""),
            (
                Some(spec::ComputedOptionalRequired::Computed),
                "Computed: true,\n",
            ),
            (
                Some(spec::ComputedOptionalRequired::ComputedOptional),
                "Computed: true,\nOptional: true,\n",
            ),
            (
                Some(spec::ComputedOptionalRequired::Optional),
                "Optional: true,\n",
            ),
            (
                Some(spec::ComputedOptionalRequired::Required),
                "Required: true,\n",
            ),
        ];
        for (value, expected) in cases {
            assert_eq!(ComputedOptionalRequired::new(value).schema(), expected);
        }
    }

    #[test]
    fn test_description_schema() {
        assert_eq!(Description::new(None).schema(), "");
        assert_eq!(
            Description::new(Some("The \"id\"")).schema(),
            "Description: \"The \\\"id\\\"\",\nMarkdownDescription: \"The \\\"id\\\"\",\n"
        );
    }

    #[test]
    fn test_deprecation_message_schema() {
        assert_eq!(
            DeprecationMessage::new(Some("use other")).schema(),
            "DeprecationMessage: \"use other\",\n"
        );
    }

    #[test]
    fn test_sensitive_schema() {
        assert_eq!(Sensitive::new(None).schema(), "");
        assert_eq!(Sensitive::new(Some(false)).schema(), "");
        assert_eq!(Sensitive::new(Some(true)).schema(), "Sensitive: true,\n");
    }
}
