/// Convert a type descriptor to its Java source spelling.
///
/// Unknown shapes are returned unchanged.
///
/// # Examples
/// ```
/// use dexir_core::utils::pretty_descriptor;
/// assert_eq!(pretty_descriptor("Ljava/lang/String;"), "java.lang.String");
/// assert_eq!(pretty_descriptor("[[I"), "int[][]");
/// assert_eq!(pretty_descriptor("V"), "void");
/// ```
pub fn pretty_descriptor(descriptor: &str) -> String {
    let dims = descriptor.bytes().take_while(|&b| b == b'[').count();
    let element = &descriptor[dims..];

    let base = match element {
        "V" => "void".to_string(),
        "Z" => "boolean".to_string(),
        "B" => "byte".to_string(),
        "S" => "short".to_string(),
        "C" => "char".to_string(),
        "I" => "int".to_string(),
        "J" => "long".to_string(),
        "F" => "float".to_string(),
        "D" => "double".to_string(),
        _ => match element.strip_prefix('L').and_then(|s| s.strip_suffix(';')) {
            Some(class) => class.replace('/', "."),
            None => return descriptor.to_string(),
        },
    };

    let mut out = base;
    for _ in 0..dims {
        out.push_str("[]");
    }
    out
}

/// What an access-flags word belongs to. Some bits mean different things
/// on fields and methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagTarget {
    Class,
    Field,
    Method,
}

const COMMON_FLAGS: &[(u32, &str)] = &[
    (0x0001, "public"),
    (0x0002, "private"),
    (0x0004, "protected"),
    (0x0008, "static"),
    (0x0010, "final"),
];

const CLASS_FLAGS: &[(u32, &str)] = &[
    (0x0200, "interface"),
    (0x0400, "abstract"),
    (0x1000, "synthetic"),
    (0x2000, "annotation"),
    (0x4000, "enum"),
];

const FIELD_FLAGS: &[(u32, &str)] = &[
    (0x0040, "volatile"),
    (0x0080, "transient"),
    (0x1000, "synthetic"),
    (0x4000, "enum"),
];

const METHOD_FLAGS: &[(u32, &str)] = &[
    (0x0020, "synchronized"),
    (0x0040, "bridge"),
    (0x0080, "varargs"),
    (0x0100, "native"),
    (0x0400, "abstract"),
    (0x0800, "strictfp"),
    (0x1000, "synthetic"),
    (0x10000, "constructor"),
    (0x20000, "declared-synchronized"),
];

/// Render access flags as space-separated keywords, in bit order.
///
/// # Examples
/// ```
/// use dexir_core::utils::{FlagTarget, access_flags_string};
/// assert_eq!(access_flags_string(0x0009, FlagTarget::Method), "public static");
/// assert_eq!(access_flags_string(0x10001, FlagTarget::Method), "public constructor");
/// ```
pub fn access_flags_string(flags: u32, target: FlagTarget) -> String {
    let specific = match target {
        FlagTarget::Class => CLASS_FLAGS,
        FlagTarget::Field => FIELD_FLAGS,
        FlagTarget::Method => METHOD_FLAGS,
    };

    let mut names: Vec<(u32, &str)> = COMMON_FLAGS
        .iter()
        .chain(specific.iter())
        .filter(|(bit, _)| flags & bit != 0)
        .copied()
        .collect();
    names.sort_by_key(|(bit, _)| *bit);

    names
        .into_iter()
        .map(|(_, name)| name)
        .collect::<Vec<_>>()
        .join(" ")
}
