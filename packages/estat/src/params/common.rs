//! Parameters shared by every request and the small enumerations used across
//! operation parameters.

use std::fmt;
use std::str::FromStr;

use roxmltree::Node;
use serde::Serialize;

use crate::error::DecodeError;
use crate::query::{QueryWriter, ToQuery};
use crate::xml::{echo_parse, FromXml};

/// Response language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Lang {
    /// Japanese (service default).
    #[serde(rename = "J")]
    Japanese,

    /// English.
    #[serde(rename = "E")]
    English,
}

impl Lang {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Japanese => "J",
            Self::English => "E",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "J" | "j" => Ok(Self::Japanese),
            "E" | "e" => Ok(Self::English),
            other => Err(format!("unknown language code '{other}', expected J or E")),
        }
    }
}

/// A `Y`/`N` switch such as `metaGetFlg` or `explanationGetFlg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Flag {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yes => "Y",
            Self::No => "N",
        })
    }
}

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Y" => Ok(Self::Yes),
            "N" => Ok(Self::No),
            other => Err(format!("unknown flag '{other}', expected Y or N")),
        }
    }
}

/// Dataset registration mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProcessMode {
    /// Register or update (`E`).
    #[serde(rename = "E")]
    Edit,

    /// Delete (`D`).
    #[serde(rename = "D")]
    Delete,
}

impl fmt::Display for ProcessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Edit => "E",
            Self::Delete => "D",
        })
    }
}

impl FromStr for ProcessMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "E" => Ok(Self::Edit),
            "D" => Ok(Self::Delete),
            other => Err(format!("unknown process mode '{other}', expected E or D")),
        }
    }
}

/// Parameters sent with every request.
///
/// `Debug` is implemented by hand so the application id does not end up in
/// logs.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct CommonParams {
    /// Application id issued by the service.
    pub app_id: String,

    /// Response language; the service defaults to Japanese.
    pub lang: Option<Lang>,
}

impl CommonParams {
    #[must_use]
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            lang: None,
        }
    }

    #[must_use]
    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = Some(lang);
        self
    }
}

impl fmt::Debug for CommonParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommonParams")
            .field("app_id", &"<redacted>")
            .field("lang", &self.lang)
            .finish()
    }
}

impl ToQuery for CommonParams {
    fn write_query(&self, writer: &mut QueryWriter) {
        writer
            .required("appId", &self.app_id)
            .optional("lang", self.lang);
    }
}

/// The `PARAMETER` element of a response: the language the service used plus
/// the operation parameters it understood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EchoedParameters<P> {
    pub lang: Option<Lang>,
    #[serde(flatten)]
    pub params: P,
}

impl<P: FromXml> FromXml for EchoedParameters<P> {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        Ok(Self {
            lang: echo_parse(node, "LANG"),
            params: P::from_xml(node)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_params_query() {
        let query = CommonParams::new("my-app").to_query();
        assert_eq!(query.encode(), "appId=my-app");

        let query = CommonParams::new("my-app").with_lang(Lang::English).to_query();
        assert_eq!(query.encode(), "appId=my-app&lang=E");
    }

    #[test]
    fn test_common_params_debug_redacts_app_id() {
        let debug = format!("{:?}", CommonParams::new("secret-id"));
        assert!(!debug.contains("secret-id"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_lang_from_str() {
        assert_eq!("J".parse::<Lang>(), Ok(Lang::Japanese));
        assert_eq!("e".parse::<Lang>(), Ok(Lang::English));
        assert!("X".parse::<Lang>().is_err());
    }

    #[test]
    fn test_flag_round_trip_through_display() {
        assert_eq!(Flag::Yes.to_string(), "Y");
        assert_eq!(Flag::from(false), Flag::No);
        assert_eq!("N".parse::<Flag>(), Ok(Flag::No));
        assert!("yes".parse::<Flag>().is_err());
    }

    #[test]
    fn test_process_mode() {
        assert_eq!(ProcessMode::Edit.to_string(), "E");
        assert_eq!("D".parse::<ProcessMode>(), Ok(ProcessMode::Delete));
    }
}
