//! Walking an instruction stream.
//!
//! [`InstructionIter`] trusts the stream. [`SafeInstructionIter`] checks
//! every step against the code length and stops for good at the first
//! instruction that would run past the end.

use super::instruction::Instruction;

/// Trusting iterator: yields `(pc, instruction)` assuming every width fits.
///
/// A truncated final instruction panics when its size is read.
#[derive(Clone, Debug)]
pub struct InstructionIter<'a> {
    insns: &'a [u16],
    pc: usize,
}

impl<'a> InstructionIter<'a> {
    pub fn new(insns: &'a [u16]) -> Self {
        Self { insns, pc: 0 }
    }
}

impl<'a> Iterator for InstructionIter<'a> {
    type Item = (usize, Instruction<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pc >= self.insns.len() {
            return None;
        }
        let pc = self.pc;
        let inst = Instruction::at(self.insns, pc);
        self.pc += inst.size_in_code_units();
        Some((pc, inst))
    }
}

/// Position of a [`SafeInstructionIter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterState {
    Positioned(usize),
    End,
    /// The stream is truncated or malformed. Terminal.
    Error,
}

/// Bounds-checked iterator over one code item's instructions.
#[derive(Clone, Debug)]
pub struct SafeInstructionIter<'a> {
    insns: &'a [u16],
    state: IterState,
    failed_at: Option<usize>,
}

impl<'a> SafeInstructionIter<'a> {
    pub fn new(insns: &'a [u16]) -> Self {
        let state = if insns.is_empty() {
            IterState::End
        } else {
            IterState::Positioned(0)
        };
        Self {
            insns,
            state,
            failed_at: None,
        }
    }

    pub fn state(&self) -> IterState {
        self.state
    }

    pub fn is_error(&self) -> bool {
        self.state == IterState::Error
    }

    pub fn is_end(&self) -> bool {
        self.state == IterState::End
    }

    /// pc of the instruction that did not fit, once in the `Error` state.
    pub fn failed_at(&self) -> Option<usize> {
        self.failed_at
    }

    /// Current pc. Panics unless positioned.
    pub fn pc(&self) -> usize {
        match self.state {
            IterState::Positioned(pc) => pc,
            state => panic!("no instruction at iterator in state {state:?}"),
        }
    }

    /// Instruction under the iterator. Panics unless positioned.
    pub fn current(&self) -> Instruction<'a> {
        Instruction::at(self.insns, self.pc())
    }

    /// Step to the next instruction.
    ///
    /// Panics when called in the `End` or `Error` state.
    pub fn advance(&mut self) -> IterState {
        let pc = self.pc();
        self.state = match self.checked_size(pc) {
            Some(size) if pc + size == self.insns.len() => IterState::End,
            Some(size) => IterState::Positioned(pc + size),
            None => {
                self.failed_at = Some(pc);
                IterState::Error
            }
        };
        self.state
    }

    /// Size of the instruction at `pc` if it fits in what is left.
    fn checked_size(&self, pc: usize) -> Option<usize> {
        let available = self.insns.len() - pc;
        let inst = Instruction::at(self.insns, pc);
        if inst.code_units_required_for_size_computation() > available {
            return None;
        }
        let size = inst.size_in_code_units();
        (size <= available).then_some(size)
    }
}

/// Yields only instructions that fit; ends at `End` or on entering `Error`.
impl<'a> Iterator for SafeInstructionIter<'a> {
    type Item = (usize, Instruction<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let IterState::Positioned(pc) = self.state else {
            return None;
        };
        if self.checked_size(pc).is_none() {
            self.state = IterState::Error;
            self.failed_at = Some(pc);
            return None;
        }
        let inst = self.current();
        self.advance();
        Some((pc, inst))
    }
}
