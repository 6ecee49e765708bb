use std::fmt;

/// Error codes for all promotion-core diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E1xxx: Declaration errors
/// - E2xxx: Promotion errors
/// - E3xxx: Literal binding errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Declaration Errors (E1xxx)
    /// Duplicate type name
    E1001,
    /// Union declared with direct fields
    E1002,
    /// Duplicate direct field name within one type
    E1003,
    /// Same member type embedded twice in one type
    E1004,

    // Promotion Errors (E2xxx)
    /// Cyclic embedding
    E2001,
    /// Embedded member type not declared
    E2002,
    /// Ambiguous promoted name
    E2003,

    // Binding Errors (E3xxx)
    /// Unknown field in literal
    E3001,
    /// Ambiguous field in literal
    E3002,
    /// Invalid value for an embedded member
    E3003,
}

impl ErrorCode {
    /// Short description of what this error code means.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E1001 => "duplicate type name",
            ErrorCode::E1002 => "union with direct fields",
            ErrorCode::E1003 => "duplicate field name",
            ErrorCode::E1004 => "duplicate embedded member",
            ErrorCode::E2001 => "cyclic embedding",
            ErrorCode::E2002 => "unknown embedded type",
            ErrorCode::E2003 => "ambiguous promoted name",
            ErrorCode::E3001 => "unknown field",
            ErrorCode::E3002 => "ambiguous field",
            ErrorCode::E3003 => "invalid member literal",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_debug() {
        assert_eq!(ErrorCode::E2001.to_string(), "E2001");
    }

    #[test]
    fn descriptions_are_nonempty() {
        let codes = [
            ErrorCode::E1001,
            ErrorCode::E1002,
            ErrorCode::E1003,
            ErrorCode::E1004,
            ErrorCode::E2001,
            ErrorCode::E2002,
            ErrorCode::E2003,
            ErrorCode::E3001,
            ErrorCode::E3002,
            ErrorCode::E3003,
        ];
        for code in codes {
            assert!(!code.description().is_empty());
        }
    }
}
