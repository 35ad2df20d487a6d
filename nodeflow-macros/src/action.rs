use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitStr};

pub fn derive_action_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Action can only be derived for enums",
            ))
        }
    };

    let mut label_arms = vec![];
    let mut terminal: Option<Ident> = None;

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Action variants cannot carry data",
            ));
        }

        let variant_name = &variant.ident;
        let mut label = variant_name.to_string().to_case(Case::Snake);
        let mut is_default = false;

        for attr in variant.attrs.iter().filter(|attr| attr.path().is_ident("action")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("terminal") {
                    if terminal.is_some() {
                        return Err(meta.error("only one variant can be terminal"));
                    }
                    terminal = Some(variant_name.clone());
                    Ok(())
                } else if meta.path.is_ident("default") {
                    is_default = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let renamed: LitStr = meta.value()?.parse()?;
                    label = renamed.value();
                    Ok(())
                } else {
                    Err(meta.error("expected `terminal`, `default` or `rename = \"...\"`"))
                }
            })?;
        }

        let label_expr = if is_default {
            quote! { ::nodeflow_core::Label::DEFAULT }
        } else {
            quote! { ::nodeflow_core::Label::new(#label) }
        };
        label_arms.push(quote! {
            Self::#variant_name => #label_expr
        });
    }

    let terminal = terminal.ok_or_else(|| {
        syn::Error::new_spanned(name, "mark one variant with #[action(terminal)]")
    })?;

    Ok(quote! {
        impl #impl_generics ::nodeflow_core::Action for #name #ty_generics #where_clause {
            fn label(&self) -> ::nodeflow_core::Label {
                match self {
                    #(#label_arms),*
                }
            }

            fn terminal() -> Self {
                Self::#terminal
            }
        }
    })
}
