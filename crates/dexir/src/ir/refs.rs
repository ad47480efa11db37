//! Typed handles into the IR arenas.
//!
//! A handle is the position of an object in its section's storage. It stays
//! valid for the lifetime of the [`Collections`](super::Collections) that
//! issued it; sorting a section reorders iteration, never storage.

/// Common behaviour of every handle type.
pub trait Handle: Copy + Eq + std::hash::Hash + std::fmt::Debug {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

macro_rules! define_refs {
    ($($(#[$meta:meta])* $name:ident;)*) => {$(
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl Handle for $name {
            #[inline]
            fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl $name {
            /// Position in the owning section's storage. For id sections
            /// this is the on-disk index.
            #[inline]
            pub fn as_u32(self) -> u32 {
                self.0
            }
        }
    )*};
}

define_refs! {
    /// A `string_id_item`.
    StringRef;
    StringDataRef;
    /// A `type_id_item`.
    TypeRef;
    TypeListRef;
    ProtoRef;
    FieldRef;
    MethodRef;
    ClassDefRef;
    ClassDataRef;
    CodeItemRef;
    DebugInfoRef;
    EncodedArrayRef;
    AnnotationRef;
    AnnotationSetRef;
    AnnotationSetRefListRef;
    AnnotationsDirectoryRef;
    CallSiteRef;
    MethodHandleRef;
}
