use darling::{
    ast::{Data, Style},
    util::Ignored,
    FromDeriveInput, FromField,
};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{ext::IdentExt, parse_quote, DeriveInput, Error, Generics, LitStr, Type, Visibility};

use crate::rename::RenameRule;

#[derive(FromDeriveInput)]
#[darling(attributes(shape))]
struct ShapeOpts {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, ShapeFieldOpt>,
    #[darling(default)]
    rename_all: Option<RenameRule>,
}

#[derive(FromField)]
#[darling(attributes(shape))]
struct ShapeFieldOpt {
    ident: Option<Ident>,
    ty: Type,
    vis: Visibility,
    #[darling(default)]
    skip: bool,
    #[darling(default)]
    include: bool,
    #[darling(default)]
    rename: Option<String>,
}

/// A field that ends up in the generated descriptor list.
struct ShapedField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    name: String,
}

impl ShapeFieldOpt {
    fn is_shaped(&self) -> Result<bool, Error> {
        if self.skip && self.include {
            return Err(Error::new_spanned(
                &self.ident,
                "`skip` and `include` cannot be combined",
            ));
        }
        let public = matches!(self.vis, Visibility::Public(_));
        Ok((public || self.include) && !self.skip)
    }

    fn exposed_name(&self, ident: &Ident, rule: Option<RenameRule>) -> String {
        if let Some(rename) = &self.rename {
            return rename.clone();
        }
        let raw = ident.unraw().to_string();
        match rule {
            Some(rule) => rule.apply(&raw),
            None => raw,
        }
    }
}

pub(crate) fn handle(ast: DeriveInput) -> Result<TokenStream, Error> {
    let opts = ShapeOpts::from_derive_input(&ast)?;

    let struct_name = &opts.ident;
    let Data::Struct(data_struct) = &opts.data else {
        return Err(Error::new_spanned(
            struct_name,
            "Shape can only be derived for structs with named fields",
        ));
    };
    if !matches!(data_struct.style, Style::Struct) {
        return Err(Error::new_spanned(
            struct_name,
            "Shape can only be derived for structs with named fields",
        ));
    }

    let mut fields: Vec<ShapedField<'_>> = Vec::new();
    for field in data_struct.fields.iter() {
        if !field.is_shaped()? {
            continue;
        }
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(struct_name, "expected a named struct field"))?;
        let name = field.exposed_name(ident, opts.rename_all);

        // Lookup ignores case, so names differing only in case would shadow each other.
        if let Some(other) = fields.iter().find(|f| eq_ignore_case(&f.name, &name)) {
            let message = if other.name == name {
                format!("more than one field is exposed as `{name}`")
            } else {
                format!(
                    "`{name}` collides with `{}`: field names are matched ignoring case",
                    other.name
                )
            };
            return Err(Error::new_spanned(ident, message));
        }
        fields.push(ShapedField {
            ident,
            ty: &field.ty,
            name,
        });
    }

    Ok(trait_shape_codegen(struct_name, &opts.generics, &fields))
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn trait_shape_codegen(
    struct_name: &Ident,
    generics: &Generics,
    fields: &[ShapedField<'_>],
) -> TokenStream {
    let krate = quote!(::rust_data_shaping);

    let mut generics = generics.clone();
    if generics.type_params().next().is_some() {
        let where_clause = generics.make_where_clause();
        for field in fields {
            let ty = field.ty;
            where_clause
                .predicates
                .push(parse_quote!(#ty: #krate::ToValue));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let descriptors = fields.iter().map(|field| {
        let ident = field.ident;
        let name = LitStr::new(&field.name, ident.span());
        quote! {
            #krate::FieldDescriptor::new(#name, |record: &Self| {
                #krate::ToValue::to_value(&record.#ident)
            })
        }
    });

    let type_name = LitStr::new(&struct_name.unraw().to_string(), struct_name.span());

    quote! {
        impl #impl_generics #krate::Shape for #struct_name #ty_generics #where_clause {
            fn field_descriptors() -> ::std::vec::Vec<#krate::FieldDescriptor<Self>> {
                ::std::vec![#(#descriptors),*]
            }

            fn type_name() -> &'static str {
                #type_name
            }
        }
    }
}
