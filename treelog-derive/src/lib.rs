use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    Data, DataEnum, DataStruct, DeriveInput, Field, Fields, Generics, Ident, Index, LitStr,
    Visibility, parse_macro_input, parse_quote,
};

/// Derives `treelog::Introspect`.
///
/// Container attributes, inside `#[introspect(...)]`:
/// - `simple`: the value is an atomic leaf whose text comes from `Display`;
/// - `display`: keep the structure but take the text from `Display`;
/// - `private`: include non-`pub` fields;
/// - `property = "method"`: add the result of `self.method()` as a member;
/// - `try_property = "method"`: same, for a method returning `Result<T, E: Display>`.
///
/// Field attributes: `skip` and `rename = "name"`.
#[proc_macro_derive(Introspect, attributes(introspect))]
pub fn derive_introspect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[derive(Default)]
struct ContainerOpts {
    simple: bool,
    display: bool,
    private: bool,
    properties: Vec<Property>,
}

struct Property {
    method: Ident,
    fallible: bool,
}

#[derive(Default)]
struct FieldOpts {
    skip: bool,
    rename: Option<String>,
}

fn container_opts(input: &DeriveInput) -> syn::Result<ContainerOpts> {
    let mut opts = ContainerOpts::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("introspect") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("simple") {
                opts.simple = true;
            } else if meta.path.is_ident("display") {
                opts.display = true;
            } else if meta.path.is_ident("private") {
                opts.private = true;
            } else if meta.path.is_ident("property") || meta.path.is_ident("try_property") {
                let fallible = meta.path.is_ident("try_property");
                let lit: LitStr = meta.value()?.parse()?;
                opts.properties.push(Property {
                    method: lit.parse()?,
                    fallible,
                });
            } else {
                return Err(meta.error("unsupported introspect attribute"));
            }
            Ok(())
        })?;
    }
    Ok(opts)
}

fn field_opts(field: &Field) -> syn::Result<FieldOpts> {
    let mut opts = FieldOpts::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("introspect") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                opts.skip = true;
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                opts.rename = Some(lit.value());
            } else {
                return Err(meta.error("unsupported introspect field attribute"));
            }
            Ok(())
        })?;
    }
    Ok(opts)
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let opts = container_opts(&input)?;
    let name = &input.ident;
    let generics = add_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let display_text = quote! {
        fn text(&self) -> ::std::string::String {
            ::std::string::ToString::to_string(self)
        }
    };

    let (text, shape) = if opts.simple {
        (display_text, quote! { ::treelog::Shape::Simple })
    } else {
        let (default_text, shape) = match &input.data {
            Data::Struct(data) => (quote! {}, struct_shape(data, &opts)?),
            Data::Enum(data) => {
                if !opts.properties.is_empty() {
                    return Err(syn::Error::new(
                        Span::call_site(),
                        "properties are only supported on structs",
                    ));
                }
                enum_shape(data)?
            }
            Data::Union(_) => {
                return Err(syn::Error::new(
                    Span::call_site(),
                    "Introspect cannot be derived for unions",
                ));
            }
        };
        let text = if opts.display { display_text } else { default_text };
        (text, shape)
    };

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::treelog::Introspect for #name #ty_generics #where_clause {
            #text

            fn shape(&self) -> ::treelog::Shape<'_> {
                #shape
            }
        }
    })
}

fn add_bounds(mut generics: Generics) -> Generics {
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::treelog::Introspect));
    }
    generics
}

fn member_name(field: &Field, index: usize, opts: &FieldOpts) -> String {
    match (&opts.rename, &field.ident) {
        (Some(rename), _) => rename.clone(),
        (None, Some(ident)) => ident.to_string(),
        (None, None) => index.to_string(),
    }
}

fn is_visible(field: &Field) -> bool {
    matches!(field.vis, Visibility::Public(_) | Visibility::Restricted(_))
}

fn struct_shape(data: &DataStruct, opts: &ContainerOpts) -> syn::Result<TokenStream2> {
    let mut members = Vec::new();

    for (index, field) in data.fields.iter().enumerate() {
        let field_opts = field_opts(field)?;
        if field_opts.skip || !(opts.private || is_visible(field)) {
            continue;
        }
        let name = member_name(field, index, &field_opts);
        let access = match &field.ident {
            Some(ident) => quote! { self.#ident },
            None => {
                let index = Index::from(index);
                quote! { self.#index }
            }
        };
        members.push(quote! { ::treelog::Member::field(#name, &#access) });
    }

    for property in &opts.properties {
        let method = &property.method;
        let name = method.to_string();
        members.push(if property.fallible {
            quote! { ::treelog::Member::try_property(#name, || self.#method()) }
        } else {
            quote! { ::treelog::Member::property(#name, || self.#method()) }
        });
    }

    Ok(quote! {
        ::treelog::Shape::Object(::treelog::Members::new(::std::vec![#(#members),*]))
    })
}

/// Returns the `text` override naming the active variant and the `shape` body.
fn enum_shape(data: &DataEnum) -> syn::Result<(TokenStream2, TokenStream2)> {
    let mut text_arms = Vec::new();
    let mut shape_arms = Vec::new();

    for variant in &data.variants {
        let ident = &variant.ident;
        let variant_name = ident.to_string();

        match &variant.fields {
            Fields::Unit => {
                text_arms.push(quote! { Self::#ident => #variant_name });
                shape_arms.push(quote! { Self::#ident => ::treelog::Shape::Enum(#variant_name) });
            }
            Fields::Named(fields) => {
                let mut bindings = Vec::new();
                let mut members = Vec::new();
                for (index, field) in fields.named.iter().enumerate() {
                    let field_opts = field_opts(field)?;
                    if field_opts.skip {
                        continue;
                    }
                    let name = member_name(field, index, &field_opts);
                    let binding = &field.ident;
                    bindings.push(quote! { #binding });
                    members.push(quote! { ::treelog::Member::field(#name, #binding) });
                }
                text_arms.push(quote! { Self::#ident { .. } => #variant_name });
                shape_arms.push(quote! {
                    Self::#ident { #(#bindings,)* .. } => ::treelog::Shape::Object(
                        ::treelog::Members::variant(#variant_name, ::std::vec![#(#members),*])
                    )
                });
            }
            Fields::Unnamed(fields) => {
                let mut patterns = Vec::new();
                let mut members = Vec::new();
                for (index, field) in fields.unnamed.iter().enumerate() {
                    let field_opts = field_opts(field)?;
                    if field_opts.skip {
                        patterns.push(quote! { _ });
                        continue;
                    }
                    let name = member_name(field, index, &field_opts);
                    let binding = Ident::new(&format!("__field{index}"), Span::call_site());
                    patterns.push(quote! { #binding });
                    members.push(quote! { ::treelog::Member::field(#name, #binding) });
                }
                text_arms.push(quote! { Self::#ident(..) => #variant_name });
                shape_arms.push(quote! {
                    Self::#ident(#(#patterns),*) => ::treelog::Shape::Object(
                        ::treelog::Members::variant(#variant_name, ::std::vec![#(#members),*])
                    )
                });
            }
        }
    }

    // An enum without variants can never be constructed.
    if data.variants.is_empty() {
        let never = quote! { match *self {} };
        return Ok((
            quote! { fn text(&self) -> ::std::string::String { #never } },
            never,
        ));
    }

    let text = quote! {
        fn text(&self) -> ::std::string::String {
            let name: &'static str = match self {
                #(#text_arms,)*
            };
            ::std::string::ToString::to_string(name)
        }
    };
    let shape = quote! {
        match self {
            #(#shape_arms,)*
        }
    };
    Ok((text, shape))
}
