//! Property values and unit resolution.
//!
//! The cascade hands the engine a [`PropertyMap`]. Every entry is a literal
//! [`CssValue`], a [`PropValue::Computed`] callback evaluated once while the
//! style is resolved, or a [`PropValue::Hook`] run when the renderer
//! materializes a box of this style.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::error::InvalidValue;
use crate::layout::layout_box::LayoutBox;
use crate::style::selector_context::SelectorContext;

/// A resolved property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CssValue {
    /// Keyword or length source such as `1.5em` or `vertical-rl`.
    Str(String),
    /// A bare pixel integer.
    Int(i32),
    /// A bare number, used by `line-height`.
    Float(f64),
    /// A structured value such as `{ before: "1em", start: "2em" }`.
    Map(BTreeMap<String, CssValue>),
}

impl CssValue {
    /// The value as text. Maps render as `key:value` pairs.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(n) => format!("{n}px"),
            Self::Float(f) => f.to_string(),
            Self::Map(map) => map
                .iter()
                .map(|(k, v)| format!("{k}:{}", v.to_text()))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// The string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.trim()),
            _ => None,
        }
    }

    /// The map payload, if this is a map.
    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for CssValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for CssValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i32> for CssValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for CssValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Callback computing a value (or only writing others) from the selector context.
pub type ComputedFn = Rc<dyn Fn(&mut SelectorContext<'_>) -> Option<CssValue>>;

/// Callback receiving the renderer's output handle and the finished box.
#[derive(Clone)]
pub struct BoxHook(Rc<dyn Fn(&mut dyn Any, &LayoutBox)>);

impl BoxHook {
    /// Wrap a creation hook.
    pub fn new(f: impl Fn(&mut dyn Any, &LayoutBox) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Run the hook.
    pub fn call(&self, output: &mut dyn Any, layout_box: &LayoutBox) {
        (self.0)(output, layout_box);
    }
}

impl fmt::Debug for BoxHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxHook")
    }
}

/// One cascade entry.
#[derive(Clone)]
pub enum PropValue {
    /// A literal value.
    Literal(CssValue),
    /// Evaluated exactly once while the style node is resolved.
    ///
    /// The property named `onload` is special: it runs after every other
    /// selector and inline value is registered and its return value is
    /// ignored, so it only acts through the context.
    Computed(ComputedFn),
    /// The `oncreate` hook, attached to every box of the style.
    Hook(BoxHook),
}

impl PropValue {
    /// Wrap a computed callback.
    pub fn computed(f: impl Fn(&mut SelectorContext<'_>) -> Option<CssValue> + 'static) -> Self {
        Self::Computed(Rc::new(f))
    }

    /// Wrap a creation hook.
    pub fn hook(f: impl Fn(&mut dyn Any, &LayoutBox) + 'static) -> Self {
        Self::Hook(BoxHook::new(f))
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed"),
            Self::Hook(_) => f.write_str("Hook"),
        }
    }
}

impl From<CssValue> for PropValue {
    fn from(value: CssValue) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Literal(value.into())
    }
}

/// Property name → value, as returned by the cascade.
pub type PropertyMap = BTreeMap<String, PropValue>;

/// Literal-only property map used for forced engine css.
pub type CssMap = BTreeMap<String, CssValue>;

/// What relative units resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitBase {
    /// Font size for `em`.
    pub font_size: i32,
    /// Root font size for `rem`.
    pub root_font_size: i32,
    /// Length that `100%` means.
    pub percent_base: i32,
}

/// Floor a computed length to whole pixels, saturating at the `i32` range.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn floor_px(value: f64) -> i32 {
    value.floor() as i32
}

/// [§ 5 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
///
/// Resolve a length to whole pixels. Supported units are `px` (or none),
/// `em`, `rem`, `%` and `pt`. Fractions are floored.
///
/// # Errors
///
/// Returns [`InvalidValue`] for anything that is not a number with one of
/// the supported units.
pub fn resolve_length(property: &str, value: &CssValue, base: UnitBase) -> Result<i32, InvalidValue> {
    let invalid = || InvalidValue {
        property: property.to_string(),
        value: value.to_text(),
    };
    let text = match value {
        CssValue::Int(n) => return Ok(*n),
        CssValue::Float(f) => return Ok(floor_px(*f)),
        CssValue::Str(s) => s.trim(),
        CssValue::Map(_) => return Err(invalid()),
    };
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    let number: f64 = number.parse().map_err(|_| invalid())?;
    let px = match unit.trim() {
        "" | "px" => number,
        "em" => number * f64::from(base.font_size),
        "rem" => number * f64::from(base.root_font_size),
        "%" => number * f64::from(base.percent_base) / 100.0,
        "pt" => number * 4.0 / 3.0,
        _ => return Err(invalid()),
    };
    Ok(floor_px(px))
}
