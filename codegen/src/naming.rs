//! Mapping of schema type names to Rust types, and identifier
//! sanitization against Rust's reserved words.

/// Strips a namespace prefix: `xsd:string` becomes `string`.
pub fn strip_ns(name: &str) -> &str {
    match name.split_once(':') {
        Some((_, local)) => local,
        None => name,
    }
}

/// Splits a reference into its prefix and local name.
pub fn split_ref(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

const RESERVED_WORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];

/// Replaces Rust reserved keywords to avoid compilation issues in the
/// generated code.
pub fn replace_reserved_words(identifier: &str) -> String {
    if RESERVED_WORDS.contains(&identifier) {
        return format!("{identifier}_");
    }
    normalize(identifier)
}

/// Like [`replace_reserved_words`], for identifiers in attribute
/// position. Additionally reserves `string`, which collides with the
/// string helper type emitted alongside the generated types.
pub fn replace_attr_reserved_words(identifier: &str) -> String {
    if identifier == "string" {
        return "astring".to_owned();
    }
    replace_reserved_words(identifier)
}

/// Normalizes a value into a valid identifier: designated punctuation is
/// spelled out, separators become underscores, and anything that is not
/// a letter, digit, or underscore is dropped.
pub fn normalize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '+' => out.push_str("Plus"),
            '@' => out.push_str("At"),
            '.' | '-' => out.push('_'),
            c if c.is_alphanumeric() || c == '_' => out.push(c),
            _ => (),
        }
    }
    out
}

fn primitive(local: &str) -> Option<&'static str> {
    // The sdp* names are vendor aliases seen in the wild.
    Some(match local.to_ascii_lowercase().as_str() {
        "string" | "token" | "date" | "time" | "datetime" | "sdpstring" | "sdpdate" | "sdptime"
        | "sdpdatetime" => "String",
        "float" | "sdpfloat" => "f32",
        "double" | "decimal" | "sdpdouble" | "sdpbigdecimal" => "f64",
        "integer" | "int" | "sdpinteger" | "sdpbiginteger" => "i32",
        "short" | "sdpshort" => "i16",
        "byte" | "sdpbyte" => "i8",
        "long" | "sdplong" | "timestamp" => "i64",
        "boolean" | "sdpboolean" => "bool",
        "base64binary" | "hexbinary" => "Vec<u8>",
        "unsignedint" | "nonnegativeinteger" => "u32",
        "unsignedshort" => "u16",
        "unsignedbyte" => "u8",
        "unsignedlong" => "u64",
        "anytype" => "AnyType",
        "ncname" => "NCName",
        "anyuri" => "AnyUri",
        _ => return None,
    })
}

/// Maps a schema-qualified type name to the Rust type spelled in
/// generated code. Nillable or optional values are wrapped in `Option`;
/// names outside the primitive table are treated as references to
/// generated complex types, which are always optional.
pub fn to_rust_type(xsd_type: &str, nillable: bool) -> String {
    let local = strip_ns(xsd_type);

    if let Some(mapped) = primitive(local) {
        return if nillable {
            format!("Option<{mapped}>")
        } else {
            mapped.to_owned()
        };
    }

    format!("Option<{}>", replace_reserved_words(&make_public(local)))
}

/// Strips the `Option` wrapper added by [`to_rust_type`].
pub fn strip_option(rust_type: &str) -> &str {
    rust_type
        .strip_prefix("Option<")
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(rust_type)
}

/// Canonical primitive spellings that pass through the casing transforms
/// unchanged.
const BASIC_TYPES: &[&str] = &[
    "String", "bool", "char", "f32", "f64", "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64",
    "Vec<u8>",
];

fn is_basic_type(identifier: &str) -> bool {
    BASIC_TYPES.contains(&identifier)
}

/// Produces the exported variant of an identifier by upper-casing its
/// leading character. Basic types pass through; an empty identifier maps
/// to a fixed placeholder.
pub fn make_public(identifier: &str) -> String {
    if is_basic_type(identifier) {
        return identifier.to_owned();
    }
    if identifier.is_empty() {
        return "EmptyString".to_owned();
    }

    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => identifier.to_owned(),
    }
}

/// Produces the internal variant of an identifier by lower-casing its
/// leading character.
pub fn make_private(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => identifier.to_owned(),
    }
}
