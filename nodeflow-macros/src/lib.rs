use proc_macro::TokenStream;

mod action;

/// Implement `nodeflow_core::Action` for a unit enum.
///
/// Variants map to their snake_case name. `#[action(rename = "...")]` picks a
/// different label, `#[action(default)]` maps a variant to the default label,
/// and exactly one variant must carry `#[action(terminal)]`.
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    action::derive_action_impl(input)
}
