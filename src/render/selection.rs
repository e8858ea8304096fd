//! Selection set rendering.

use crate::selection::SelectionElement;

/// Space-joined fields of a selection, without the surrounding braces.
pub fn render_fields(selection: &[SelectionElement]) -> String {
    selection
        .iter()
        .map(render_element)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `{ a b { c } }`. An empty selection renders as `{  }`.
pub fn render_braces(selection: &[SelectionElement]) -> String {
    format!("{{ {} }}", render_fields(selection))
}

fn render_element(element: &SelectionElement) -> String {
    match element {
        SelectionElement::Field(name) => name.clone(),
        SelectionElement::Nested(name, children) => format!("{} {}", name, render_braces(children)),
        // Unresolved references have nothing to splice in.
        SelectionElement::Reference { .. } => String::new(),
    }
}
