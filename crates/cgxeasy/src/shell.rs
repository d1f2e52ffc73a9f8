//! Line shell grammar.
//!
//! Each line is `<verb> <object> (<field> "<value>")*` and maps to exactly
//! one [`Command`]. Values may be bare words when they contain no spaces.
//! Anything that does not fit a known verb/object pair, or misses a
//! required field, is reported as `command not found`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use cgxeasy_core::{Command, DhcpOptionSpec, ElementTarget, SiteTarget, SnmpV3User};

/// A quoted value or a bare word.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]*)"|(\S+)"#).unwrap_or_else(|_| unreachable!("static pattern"))
});

pub const HELP: &str = "\
delete dhcppool     site S subnet N
add dhcpoption      site S subnet N name O definition D value V [vendorclass C]
remove dhcpoption   site S subnet N name O [vendorclass C]
add dhcprelay       <elements> interface I server IP
remove dhcprelay    <elements> interface I server IP
add tag             <elements> interface I tag T
remove tag          <elements> interface I tag T
set zone            <elements> interface I zone Z
clear zone          <elements> interface I
create subinterface <elements> parent I vlan N [usedfor R]
delete subinterface <elements> interface I
set snmpuser        <elements> user U [securitylevel L] [authtype A] [authphrase P]
                               [enctype E] [encphrase P] [engineid ID]
remove snmpuser     <elements> user U
set globalprefix    name L prefixes \"P1,P2\"
set localprefix     site S | sitematch RE  name L prefixes \"P1,P2\"
create tunnel       sitea A siteb B
help | exit

<elements> is one of: element NAME | elementsfile PATH | elementmatch RE
Values containing spaces must be double-quoted.";

/// One parsed shell line.
#[derive(Debug)]
pub enum Line {
    Empty,
    Help,
    Exit,
    Run(Box<Command>),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("command not found")]
    CommandNotFound,

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

fn invalid(field: &str, reason: impl Into<String>) -> ParseError {
    ParseError::InvalidValue {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── Tokenizing ───────────────────────────────────────────────────────

fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    for caps in TOKEN.captures_iter(line) {
        if let Some(quoted) = caps.get(1) {
            tokens.push(quoted.as_str().to_owned());
        } else if let Some(bare) = caps.get(2) {
            // an unterminated quote falls through to the bare-word branch
            if bare.as_str().contains('"') {
                return Err(ParseError::CommandNotFound);
            }
            tokens.push(bare.as_str().to_owned());
        }
    }
    Ok(tokens)
}

// ── Field bag ────────────────────────────────────────────────────────

struct Fields(HashMap<String, String>);

impl Fields {
    fn from_pairs(tokens: &[String]) -> Result<Self, ParseError> {
        if tokens.len() % 2 != 0 {
            return Err(ParseError::CommandNotFound);
        }
        let mut map = HashMap::new();
        for pair in tokens.chunks_exact(2) {
            let [field, value] = pair else {
                return Err(ParseError::CommandNotFound);
            };
            if map
                .insert(field.to_ascii_lowercase(), value.clone())
                .is_some()
            {
                return Err(ParseError::CommandNotFound);
            }
        }
        Ok(Self(map))
    }

    fn take(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    fn require(&mut self, field: &str) -> Result<String, ParseError> {
        self.take(field).ok_or(ParseError::CommandNotFound)
    }

    /// Leftover fields mean the line was not meant for this command.
    fn finish(self) -> Result<(), ParseError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ParseError::CommandNotFound)
        }
    }

    fn elements(&mut self) -> Result<ElementTarget, ParseError> {
        let name = self.take("element");
        let file = self.take("elementsfile");
        let pattern = self.take("elementmatch");
        match (name, file, pattern) {
            (Some(name), None, None) => Ok(ElementTarget::Name(name)),
            (None, Some(path), None) => Ok(ElementTarget::File(PathBuf::from(path))),
            (None, None, Some(re)) => Regex::new(&re)
                .map(ElementTarget::Pattern)
                .map_err(|e| invalid("elementmatch", e.to_string())),
            _ => Err(ParseError::CommandNotFound),
        }
    }

    fn sites(&mut self) -> Result<SiteTarget, ParseError> {
        match (self.take("site"), self.take("sitematch")) {
            (Some(name), None) => Ok(SiteTarget::Name(name)),
            (None, Some(re)) => Regex::new(&re)
                .map(SiteTarget::Pattern)
                .map_err(|e| invalid("sitematch", e.to_string())),
            _ => Err(ParseError::CommandNotFound),
        }
    }

    fn prefixes(&mut self) -> Result<Vec<String>, ParseError> {
        let raw = self.require("prefixes")?;
        let prefixes: Vec<String> = raw
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect();
        if prefixes.is_empty() {
            return Err(invalid("prefixes", "no prefixes given"));
        }
        Ok(prefixes)
    }
}

// ── Parsing ──────────────────────────────────────────────────────────

/// Parse one shell line. Lines starting with `#` are comments.
pub fn parse_line(line: &str) -> Result<Line, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Empty);
    }

    let tokens = tokenize(line)?;
    let Some((verb, rest)) = tokens.split_first() else {
        return Ok(Line::Empty);
    };
    let verb = verb.to_ascii_lowercase();

    match verb.as_str() {
        "help" | "?" if rest.is_empty() => return Ok(Line::Help),
        "exit" | "quit" if rest.is_empty() => return Ok(Line::Exit),
        _ => {}
    }

    let Some((object, pairs)) = rest.split_first() else {
        return Err(ParseError::CommandNotFound);
    };
    let object = object.to_ascii_lowercase();
    let mut f = Fields::from_pairs(pairs)?;

    let command = match (verb.as_str(), object.as_str()) {
        ("delete", "dhcppool") => Command::DhcpPoolDelete {
            site: f.require("site")?,
            subnet: f.require("subnet")?,
        },
        ("add", "dhcpoption") => Command::DhcpOptionAdd {
            site: f.require("site")?,
            subnet: f.require("subnet")?,
            option: DhcpOptionSpec {
                name: f.require("name")?,
                definition: f.require("definition")?,
                value: f.require("value")?,
                vendor_class: f.take("vendorclass"),
            },
        },
        ("remove", "dhcpoption") => Command::DhcpOptionRemove {
            site: f.require("site")?,
            subnet: f.require("subnet")?,
            name: f.require("name")?,
            vendor_class: f.take("vendorclass"),
        },
        ("add", "dhcprelay") => Command::RelayAdd {
            target: f.elements()?,
            interface: f.require("interface")?,
            server_ip: f.require("server")?,
        },
        ("remove", "dhcprelay") => Command::RelayRemove {
            target: f.elements()?,
            interface: f.require("interface")?,
            server_ip: f.require("server")?,
        },
        ("add", "tag") => Command::TagAdd {
            target: f.elements()?,
            interface: f.require("interface")?,
            tag: f.require("tag")?,
        },
        ("remove", "tag") => Command::TagRemove {
            target: f.elements()?,
            interface: f.require("interface")?,
            tag: f.require("tag")?,
        },
        ("set", "zone") => Command::ZoneSet {
            target: f.elements()?,
            interface: f.require("interface")?,
            zone: f.require("zone")?,
        },
        ("clear", "zone") => Command::ZoneClear {
            target: f.elements()?,
            interface: f.require("interface")?,
        },
        ("create", "subinterface") => {
            let target = f.elements()?;
            let parent = f.require("parent")?;
            let vlan = f.require("vlan")?;
            Command::SubinterfaceCreate {
                target,
                parent,
                vlan: vlan
                    .parse()
                    .map_err(|_| invalid("vlan", format!("not a number: {vlan}")))?,
                used_for: f.take("usedfor"),
            }
        }
        ("delete", "subinterface") => Command::SubinterfaceDelete {
            target: f.elements()?,
            name: f.require("interface")?,
        },
        ("set", "snmpuser") => Command::SnmpUserUpsert {
            target: f.elements()?,
            user: SnmpV3User {
                user_name: f.require("user")?,
                security_level: f.take("securitylevel"),
                auth_type: f.take("authtype"),
                auth_phrase: f.take("authphrase"),
                enc_type: f.take("enctype"),
                enc_phrase: f.take("encphrase"),
                engine_id: f.take("engineid"),
                ..SnmpV3User::default()
            },
        },
        ("remove", "snmpuser") => Command::SnmpUserRemove {
            target: f.elements()?,
            user_name: f.require("user")?,
        },
        ("set", "globalprefix") => Command::GlobalPrefixUpsert {
            name: f.require("name")?,
            prefixes: f.prefixes()?,
        },
        ("set", "localprefix") => Command::LocalPrefixUpsert {
            sites: f.sites()?,
            name: f.require("name")?,
            prefixes: f.prefixes()?,
        },
        ("create", "tunnel") => Command::TunnelCreate {
            site_a: f.require("sitea")?,
            site_b: f.require("siteb")?,
        },
        _ => return Err(ParseError::CommandNotFound),
    };

    f.finish()?;
    Ok(Line::Run(Box::new(command)))
}
