//! Narrowing conditions: which tabulation items, periods, areas and
//! category codes a data request covers.
//!
//! Each axis is a [`Condition`] with the same four fields. The fifteen
//! category axes are stored as an array and mapped to their wire names
//! (`lvCat01`, `cdCat01From`, `LEVEL_CAT01_COND`, ...) through
//! [`AXIS_PREFIXES`].

use std::str::FromStr;

use roxmltree::Node;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::DecodeError;
use crate::query::{QueryWriter, ToQuery};
use crate::xml::{child_opt, FromXml};

/// Number of parallel category axes (`cat01` to `cat15`).
pub const CATEGORY_AXES: usize = 15;

/// Wire prefixes in axis order: tabulation, time, area, then categories 1-15.
pub const AXIS_PREFIXES: [&str; CATEGORY_AXES + 3] = [
    "Tab", "Time", "Area", "Cat01", "Cat02", "Cat03", "Cat04", "Cat05", "Cat06", "Cat07",
    "Cat08", "Cat09", "Cat10", "Cat11", "Cat12", "Cat13", "Cat14", "Cat15",
];

/// Selection on one axis.
///
/// The service treats `code` and the `from`/`to` range as alternatives; the
/// client sends whatever is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    /// Hierarchy level(s) to select, e.g. `"1"` or `"1-3"`.
    pub level: Option<String>,

    /// Exact code(s), comma separated.
    pub code: Option<String>,

    /// Start of a code range.
    pub from: Option<String>,

    /// End of a code range.
    pub to: Option<String>,
}

impl Condition {
    /// Select exact codes.
    #[must_use]
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    /// Select a code range.
    #[must_use]
    pub fn range(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            ..Self::default()
        }
    }

    /// Select hierarchy levels.
    #[must_use]
    pub fn level(level: impl Into<String>) -> Self {
        Self {
            level: Some(level.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.code.is_none() && self.from.is_none() && self.to.is_none()
    }

    fn write_query(&self, prefix: &str, writer: &mut QueryWriter) {
        writer
            .optional(format!("lv{prefix}"), self.level.as_deref())
            .optional(format!("cd{prefix}"), self.code.as_deref())
            .optional(format!("cd{prefix}From"), self.from.as_deref())
            .optional(format!("cd{prefix}To"), self.to.as_deref());
    }

    fn from_echo(node: Node<'_, '_>, prefix: &str) -> Self {
        let upper = prefix.to_ascii_uppercase();
        Self {
            level: child_opt(node, &format!("LEVEL_{upper}_COND")),
            code: child_opt(node, &format!("CODE_{upper}_SELECT")),
            from: child_opt(node, &format!("CODE_{upper}_FROM")),
            to: child_opt(node, &format!("CODE_{upper}_TO")),
        }
    }
}

/// Conditions on all axes of a statistics table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NarrowingCondition {
    pub tabulation: Condition,
    pub time: Condition,
    pub area: Condition,
    /// Category axes; index 0 is `cat01`.
    pub categories: [Condition; CATEGORY_AXES],
}

impl NarrowingCondition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Condition on category axis `axis` (1-based, `1..=15`).
    #[must_use]
    pub fn category(&self, axis: usize) -> Option<&Condition> {
        axis.checked_sub(1).and_then(|i| self.categories.get(i))
    }

    /// Mutable condition on category axis `axis` (1-based).
    pub fn category_mut(&mut self, axis: usize) -> Option<&mut Condition> {
        axis.checked_sub(1).and_then(|i| self.categories.get_mut(i))
    }

    #[must_use]
    pub fn with_tabulation(mut self, condition: Condition) -> Self {
        self.tabulation = condition;
        self
    }

    #[must_use]
    pub fn with_time(mut self, condition: Condition) -> Self {
        self.time = condition;
        self
    }

    #[must_use]
    pub fn with_area(mut self, condition: Condition) -> Self {
        self.area = condition;
        self
    }

    /// Set category axis `axis` (1-based). Out-of-range axes are ignored.
    #[must_use]
    pub fn with_category(mut self, axis: usize, condition: Condition) -> Self {
        if let Some(slot) = self.category_mut(axis) {
            *slot = condition;
        }
        self
    }

    /// All axes paired with their wire prefix, in wire order.
    pub fn axes(&self) -> impl Iterator<Item = (&'static str, &Condition)> {
        [&self.tabulation, &self.time, &self.area]
            .into_iter()
            .chain(self.categories.iter())
            .zip(AXIS_PREFIXES)
            .map(|(condition, prefix)| (prefix, condition))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes().all(|(_, condition)| condition.is_empty())
    }

    /// Set one field by its query wire name, e.g. `cdCat01From`.
    pub fn set_wire(&mut self, name: &str, value: impl Into<String>) -> Result<(), String> {
        let key: WireKey = name.parse()?;
        self.set(key, value);
        Ok(())
    }

    /// Set the field addressed by an already validated wire name.
    pub fn set(&mut self, key: WireKey, value: impl Into<String>) {
        let condition = match key.axis {
            0 => &mut self.tabulation,
            1 => &mut self.time,
            2 => &mut self.area,
            n => &mut self.categories[n - 3],
        };
        let slot = match key.field {
            WireField::Level => &mut condition.level,
            WireField::Code => &mut condition.code,
            WireField::From => &mut condition.from,
            WireField::To => &mut condition.to,
        };
        *slot = Some(value.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WireField {
    Level,
    Code,
    From,
    To,
}

/// A parsed narrowing wire name such as `lvArea` or `cdCat01From`.
///
/// `axis` indexes [`AXIS_PREFIXES`], so it is always in range once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireKey {
    axis: usize,
    field: WireField,
}

impl FromStr for WireKey {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let (field, rest) = if let Some(rest) = name.strip_prefix("lv") {
            (WireField::Level, rest)
        } else if let Some(rest) = name.strip_prefix("cd") {
            if let Some(prefix) = rest.strip_suffix("From") {
                (WireField::From, prefix)
            } else if let Some(prefix) = rest.strip_suffix("To") {
                (WireField::To, prefix)
            } else {
                (WireField::Code, rest)
            }
        } else {
            return Err(format!("unknown narrowing field '{name}'"));
        };

        let axis = AXIS_PREFIXES
            .iter()
            .position(|prefix| *prefix == rest)
            .ok_or_else(|| format!("unknown narrowing axis in '{name}'"))?;
        Ok(Self { axis, field })
    }
}

impl ToQuery for NarrowingCondition {
    fn write_query(&self, writer: &mut QueryWriter) {
        for (prefix, condition) in self.axes() {
            condition.write_query(prefix, writer);
        }
    }
}

/// Decodes the `NARROWING_COND` echo.
impl FromXml for NarrowingCondition {
    fn from_xml(node: Node<'_, '_>) -> Result<Self, DecodeError> {
        let mut narrowing = Self {
            tabulation: Condition::from_echo(node, AXIS_PREFIXES[0]),
            time: Condition::from_echo(node, AXIS_PREFIXES[1]),
            area: Condition::from_echo(node, AXIS_PREFIXES[2]),
            ..Self::default()
        };
        for (slot, prefix) in narrowing.categories.iter_mut().zip(&AXIS_PREFIXES[3..]) {
            *slot = Condition::from_echo(node, prefix);
        }
        Ok(narrowing)
    }
}

/// Serializes as a flat object keyed by wire name, the shape the batch
/// endpoint expects inside each spec.
impl Serialize for NarrowingCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let query = self.to_query();
        let mut map = serializer.serialize_map(Some(query.len()))?;
        for (name, value) in query.pairs() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
