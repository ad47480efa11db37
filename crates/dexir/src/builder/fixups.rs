use std::collections::BTreeSet;

use dexir_format::format::{IndexType, SafeInstructionIter};
use tracing::warn;

use super::Builder;
use crate::ir::{CodeFixups, MethodRef, TruncatedCode};

impl Builder<'_> {
    /// Scan `insns` for referenced ids. Indices past their table are
    /// ignored. A stream ending inside an instruction is recorded as
    /// truncated, keeping whatever was collected before it.
    pub(super) fn collect_fixups(&mut self, insns: &[u16], method: MethodRef) -> CodeFixups {
        let c = &self.header.collections;
        let mut strings = BTreeSet::new();
        let mut types = BTreeSet::new();
        let mut methods = BTreeSet::new();
        let mut fields = BTreeSet::new();

        let mut iter = SafeInstructionIter::new(insns);
        for (pc, inst) in iter.by_ref() {
            let Some(index) = inst.index() else {
                continue;
            };
            let known = match inst.index_type() {
                IndexType::StringRef => c.string_ids.handle(index).map(|h| strings.insert(h)),
                IndexType::TypeRef => c.type_ids.handle(index).map(|h| types.insert(h)),
                IndexType::MethodRef | IndexType::MethodAndProtoRef => {
                    c.method_ids.handle(index).map(|h| methods.insert(h))
                }
                IndexType::FieldRef => c.field_ids.handle(index).map(|h| fields.insert(h)),
                _ => continue,
            };
            if known.is_none() {
                warn!(pc, index, opcode = inst.name(), "instruction index out of range");
            }
        }

        if let Some(pc) = iter.failed_at() {
            warn!(
                method = %self.header.collections.method_signature(method),
                pc,
                "truncated instruction stream"
            );
            self.header.truncated.push(TruncatedCode {
                method,
                pc: pc as u32,
            });
        }

        CodeFixups {
            strings: strings.into_iter().collect(),
            types: types.into_iter().collect(),
            methods: methods.into_iter().collect(),
            fields: fields.into_iter().collect(),
        }
    }
}
