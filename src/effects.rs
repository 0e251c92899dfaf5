// Render effects: the fixed vocabulary the page applies to the DOM.
// Class toggles, a few inline styles, and text/attribute writes. Nothing is read back.

use serde::Serialize;

/// Class names the stylesheet animates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Class {
    Animate,
    Connected,
    Scrolled,
    Shake,
    ScreenHidden,
    ScreenVisible,
}

/// Inline style properties used for programmatic fades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleProperty {
    Opacity,
    Transform,
    Transition,
}

/// Child element used by `SetLines`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTag {
    Span,
    P,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// One DOM mutation. `target` is a selector list applied with `querySelectorAll`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Effect {
    AddClass {
        target: &'static str,
        class: Class,
    },
    RemoveClass {
        target: &'static str,
        class: Class,
    },
    SetStyle {
        target: &'static str,
        property: StyleProperty,
        value: String,
    },
    /// Reset an inline style back to the stylesheet's value.
    ClearStyle {
        target: &'static str,
        property: StyleProperty,
    },
    SetText {
        target: &'static str,
        text: String,
    },
    SetAttr {
        target: &'static str,
        name: &'static str,
        value: String,
    },
    /// Replace the target's children with one element per line.
    SetLines {
        target: &'static str,
        tag: LineTag,
        lines: Vec<String>,
    },
}

impl Effect {
    pub fn target(&self) -> &'static str {
        match self {
            Effect::AddClass { target, .. }
            | Effect::RemoveClass { target, .. }
            | Effect::SetStyle { target, .. }
            | Effect::ClearStyle { target, .. }
            | Effect::SetText { target, .. }
            | Effect::SetAttr { target, .. }
            | Effect::SetLines { target, .. } => target,
        }
    }
}

pub fn add(target: &'static str, class: Class) -> Effect {
    Effect::AddClass { target, class }
}

pub fn remove(target: &'static str, class: Class) -> Effect {
    Effect::RemoveClass { target, class }
}

pub fn style(target: &'static str, property: StyleProperty, value: impl Into<String>) -> Effect {
    Effect::SetStyle {
        target,
        property,
        value: value.into(),
    }
}

pub fn animate(target: &'static str) -> Effect {
    add(target, Class::Animate)
}

/// Half-second fade with a directional slide.
pub fn fade_out(target: &'static str, axis: Axis, offset_px: i32) -> Vec<Effect> {
    let axis = match axis {
        Axis::X => "X",
        Axis::Y => "Y",
    };
    vec![
        style(target, StyleProperty::Transition, "opacity 0.5s ease, transform 0.5s ease"),
        style(target, StyleProperty::Opacity, "0"),
        style(target, StyleProperty::Transform, format!("translate{}({}px)", axis, offset_px)),
    ]
}

/// Quick opacity-only fade used for scroll hints.
pub fn fade_hint(target: &'static str) -> Vec<Effect> {
    vec![
        style(target, StyleProperty::Transition, "opacity 0.3s ease"),
        style(target, StyleProperty::Opacity, "0"),
    ]
}

pub fn show(target: &'static str) -> Vec<Effect> {
    vec![remove(target, Class::ScreenHidden), add(target, Class::ScreenVisible)]
}

pub fn hide(target: &'static str) -> Vec<Effect> {
    vec![add(target, Class::ScreenHidden), remove(target, Class::ScreenVisible)]
}

pub fn clear_styles(target: &'static str) -> Vec<Effect> {
    [StyleProperty::Transition, StyleProperty::Opacity, StyleProperty::Transform]
        .into_iter()
        .map(|property| Effect::ClearStyle { target, property })
        .collect()
}

/// Back to the pre-entrance state: no `animate`, no inline styles.
pub fn strip(target: &'static str) -> Vec<Effect> {
    let mut effects = vec![remove(target, Class::Animate)];
    effects.extend(clear_styles(target));
    effects
}

/// Back to the settled post-entrance state without replaying the stagger.
pub fn restore(target: &'static str) -> Vec<Effect> {
    let mut effects = clear_styles(target);
    effects.push(animate(target));
    effects
}
