// ── DHCP custom option matching ──
//
// Custom options carry no structured name; the name has to be read out of
// the ISC-style `option_definition` text, e.g.
// `option tftp-server code 150 = ip-address;`.

use cgxeasy_api::models::DhcpCustomOption;

/// Decides whether a pool's custom option is the option called `name`.
pub trait OptionMatcher: Send + Sync {
    fn matches(&self, option: &DhcpCustomOption, name: &str) -> bool;
}

/// Substring test for `"option <name> code"` anywhere in the definition.
///
/// Loose: extra whitespace defeats it and a name that is a suffix of
/// another can still collide when embedded in free text. This is the
/// session default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl OptionMatcher for SubstringMatcher {
    fn matches(&self, option: &DhcpCustomOption, name: &str) -> bool {
        let needle = format!("option {name} code");
        option
            .option_definition
            .as_deref()
            .is_some_and(|def| def.contains(&needle))
    }
}

/// Parses `option <name> code <number> ...` token by token and compares
/// the declared name exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarMatcher;

impl GrammarMatcher {
    /// The option name a definition declares, if it is well formed.
    pub fn declared_name(definition: &str) -> Option<&str> {
        let mut tokens = definition.split_whitespace();
        if tokens.next()? != "option" {
            return None;
        }
        let name = tokens.next()?;
        if tokens.next()? != "code" {
            return None;
        }
        let code = tokens.next()?.trim_end_matches(';');
        code.parse::<u8>().ok()?;
        Some(name)
    }
}

impl OptionMatcher for GrammarMatcher {
    fn matches(&self, option: &DhcpCustomOption, name: &str) -> bool {
        option
            .option_definition
            .as_deref()
            .and_then(Self::declared_name)
            == Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(def: &str) -> DhcpCustomOption {
        DhcpCustomOption {
            option_definition: Some(def.into()),
            ..Default::default()
        }
    }

    #[test]
    fn substring_matches_canonical_definition() {
        let opt = option("option tftp-server code 150 = ip-address;");
        assert!(SubstringMatcher.matches(&opt, "tftp-server"));
        assert!(!SubstringMatcher.matches(&opt, "tftp"));
    }

    #[test]
    fn substring_is_defeated_by_spacing() {
        let opt = option("option  tftp-server  code 150 = ip-address;");
        assert!(!SubstringMatcher.matches(&opt, "tftp-server"));
        assert!(GrammarMatcher.matches(&opt, "tftp-server"));
    }

    #[test]
    fn substring_matches_embedded_text() {
        let opt = option("# legacy: option voip code 1 ; option voip-tftp code 150 = ip-address;");
        assert!(SubstringMatcher.matches(&opt, "voip"));
        assert!(!GrammarMatcher.matches(&opt, "voip"));
    }

    #[test]
    fn grammar_requires_numeric_code() {
        assert_eq!(GrammarMatcher::declared_name("option foo code 43;"), Some("foo"));
        assert_eq!(GrammarMatcher::declared_name("option foo code abc"), None);
        assert_eq!(GrammarMatcher::declared_name("subnet 10.0.0.0"), None);
    }

    #[test]
    fn missing_definition_never_matches() {
        let opt = DhcpCustomOption::default();
        assert!(!SubstringMatcher.matches(&opt, "x"));
        assert!(!GrammarMatcher.matches(&opt, "x"));
    }
}
