//! Macro `#[derive(Element)]` for storing user types in `slotbuf` buffers.
//!
//! See the `slotbuf` crate's `Element` trait.

use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{
    parse_quote, Attribute, Data, DeriveInput, GenericParam, Lit, Meta, NestedMeta, Type,
};

/// Derives `slotbuf::Element`, so the type can be stored in a `slotbuf` buffer.
///
/// The type must also implement `Clone`. Every type parameter is required to be an `Element`
/// itself, and fields may not hold references or raw pointers.
///
/// # Examples
///
/// ```
/// use slotbuf::prelude::*;
///
/// #[derive(Clone, Debug, PartialEq, Element)]
/// struct Particle {
///     position: [f32; 3],
///     label: String,
/// }
///
/// let mut particles = Array::new();
/// particles
///     .push_back(&Particle { position: [0.0; 3], label: "origin".into() })
///     .unwrap();
/// assert_eq!(particles[0].label, "origin");
/// ```
///
/// The relocation strategy can be chosen with `#[element(relocate = "...")]`, one of
/// `"bitwise"`, `"move"` or `"copy"`. Without the attribute, the strategy follows whether the
/// type has drop glue.
///
/// ```
/// use slotbuf::prelude::*;
///
/// #[derive(Clone, Element)]
/// #[element(relocate = "copy")]
/// struct Registered {
///     id: u64,
/// }
///
/// #[derive(Clone, Element)]
/// enum Shape<T> {
///     Point(T),
///     Segment(T, T),
/// }
///
/// # fn main() {
/// assert_eq!(<Registered as Element>::RELOCATION, Relocation::Copy);
/// assert_eq!(<Shape<u8> as Element>::RELOCATION, Relocation::Bitwise);
/// assert_eq!(<Shape<String> as Element>::RELOCATION, Relocation::Move);
/// # }
/// ```
///
/// Borrowed data is rejected at build time:
///
/// ```compile_fail
/// use slotbuf::prelude::*;
///
/// #[derive(Clone, Element)]
/// struct Borrowed<'a> {
///     name: &'a str,
/// }
/// ```
///
/// ```compile_fail
/// use slotbuf::prelude::*;
///
/// #[derive(Clone, Element)]
/// struct Raw {
///     cursor: *const u8,
/// }
/// ```
///
/// ```compile_fail
/// use slotbuf::prelude::*;
///
/// #[derive(Clone, Element)]
/// #[element(relocate = "sideways")]
/// struct Unknown(u8);
/// ```
#[proc_macro_derive(Element, attributes(element))]
pub fn derive_element(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let item: TokenStream = item.into();
    match derive_element_impl(item) {
        Ok(x) => x,
        Err(Error(msg, span)) => quote_spanned!(span =>
            ::core::compile_error!(#msg);
        ),
    }
    .into()
}

struct Error(&'static str, Span);

fn derive_element_impl(item: TokenStream) -> Result<TokenStream, Error> {
    let d: DeriveInput = match syn::parse2(item) {
        Ok(d) => d,
        Err(e) => {
            return Err(Error(
                "derive(Element) could not parse this item",
                e.span(),
            ))
        }
    };

    let relocation = Relocation::from_attrs(&d.attrs)?;

    let mut borrows = Borrows::new();
    match &d.data {
        Data::Struct(s) => s.fields.iter().for_each(|f| borrows.add(&f.ty)),
        Data::Enum(e) => e
            .variants
            .iter()
            .flat_map(|v| v.fields.iter())
            .for_each(|f| borrows.add(&f.ty)),
        Data::Union(u) => {
            return Err(Error(
                "derive(Element) does not support unions",
                u.union_token.span(),
            ))
        }
    }
    if let Some(span) = borrows.first {
        return Err(Error(
            "Element types must own their data; references and raw pointers are not allowed",
            span,
        ));
    }

    let mut generics = d.generics.clone();
    let mut type_params = Vec::new();
    for param in &generics.params {
        match param {
            GenericParam::Type(t) => type_params.push(t.ident.clone()),
            GenericParam::Lifetime(l) => {
                return Err(Error(
                    "Element types cannot have lifetime parameters",
                    l.span(),
                ))
            }
            GenericParam::Const(_) => {}
        }
    }
    let where_clause = generics.make_where_clause();
    for ident in &type_params {
        where_clause
            .predicates
            .push(parse_quote!(#ident: ::slotbuf::Element));
    }

    let tyname = &d.ident;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let relocation_const = relocation.map(|r| {
        let variant = r.variant();
        quote! {
            const RELOCATION: ::slotbuf::Relocation = ::slotbuf::Relocation::#variant;
        }
    });
    Ok(quote! {
        impl #impl_generics ::slotbuf::Element for #tyname #ty_generics #where_clause {
            #relocation_const
        }
    })
}

/// Strategy requested with `#[element(relocate = "...")]`.
#[derive(Clone, Copy)]
enum Relocation {
    Bitwise,
    Move,
    Copy,
}

impl Relocation {
    fn variant(self) -> proc_macro2::Ident {
        let name = match self {
            Relocation::Bitwise => "Bitwise",
            Relocation::Move => "Move",
            Relocation::Copy => "Copy",
        };
        proc_macro2::Ident::new(name, Span::call_site())
    }

    fn from_attrs(attrs: &[Attribute]) -> Result<Option<Self>, Error> {
        let mut found = None;
        for attr in attrs.iter().filter(|a| a.path.is_ident("element")) {
            let list = match attr.parse_meta() {
                Ok(Meta::List(list)) => list,
                _ => {
                    return Err(Error(
                        "expected #[element(relocate = \"bitwise\" | \"move\" | \"copy\")]",
                        attr.span(),
                    ))
                }
            };
            for nested in &list.nested {
                let nv = match nested {
                    NestedMeta::Meta(Meta::NameValue(nv)) if nv.path.is_ident("relocate") => nv,
                    _ => return Err(Error("unknown element option", nested.span())),
                };
                if found.is_some() {
                    return Err(Error("relocate is specified more than once", nv.span()));
                }
                let value = match &nv.lit {
                    Lit::Str(s) => s.value(),
                    _ => return Err(Error("relocate expects a string", nv.lit.span())),
                };
                found = Some(match value.as_str() {
                    "bitwise" => Relocation::Bitwise,
                    "move" => Relocation::Move,
                    "copy" => Relocation::Copy,
                    _ => {
                        return Err(Error(
                            "relocate must be \"bitwise\", \"move\" or \"copy\"",
                            nv.lit.span(),
                        ))
                    }
                });
            }
        }
        Ok(found)
    }
}

/// Finds borrowed data anywhere inside field types.
struct Borrows {
    /// Span of the first reference, raw pointer or lifetime seen.
    first: Option<Span>,
}

impl Borrows {
    fn new() -> Self {
        Borrows { first: None }
    }

    fn add(&mut self, ty: &Type) {
        syn::visit::visit_type(self, ty);
    }

    fn note(&mut self, span: Span) {
        self.first.get_or_insert(span);
    }
}

impl<'ast> syn::visit::Visit<'ast> for Borrows {
    fn visit_type_reference(&mut self, node: &'ast syn::TypeReference) {
        self.note(node.span());
    }

    fn visit_type_ptr(&mut self, node: &'ast syn::TypePtr) {
        self.note(node.span());
    }

    fn visit_lifetime(&mut self, node: &'ast syn::Lifetime) {
        self.note(node.span());
    }
}
