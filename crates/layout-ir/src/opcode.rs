//! Instruction opcodes.

use core::fmt;

/// Which condition code family a conditional branch tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Relational,
    Result,
    Double,
    Status,
}

/// Instruction opcode
///
/// Only the shape of each instruction matters to layout: whether it ends a
/// block, how many successors it has, and for two-way branches which kind of
/// condition its first argument holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Nop,
    Move,
    Move32,
    Add32,
    Add64,
    Sub32,
    Sub64,

    // Terminals
    /// Unconditional jump to the single successor
    Jump,
    Ret32,
    Ret64,
    /// Unreachable; traps if executed
    Oops,

    // Compare and branch
    Branch8,
    Branch32,
    Branch64,
    BranchTest8,
    BranchTest32,
    BranchTest64,
    BranchFloat,
    BranchDouble,

    // Arithmetic and branch on the result
    BranchAdd32,
    BranchAdd64,
    BranchMul32,
    BranchMul64,
    BranchSub32,
    BranchSub64,
    BranchNeg32,
    BranchNeg64,

    // Compare-and-swap and branch on success
    BranchAtomicStrongCAS8,
    BranchAtomicStrongCAS16,
    BranchAtomicStrongCAS32,
    BranchAtomicStrongCAS64,
}

impl Opcode {
    pub const ALL: [Opcode; 31] = [
        Opcode::Nop,
        Opcode::Move,
        Opcode::Move32,
        Opcode::Add32,
        Opcode::Add64,
        Opcode::Sub32,
        Opcode::Sub64,
        Opcode::Jump,
        Opcode::Ret32,
        Opcode::Ret64,
        Opcode::Oops,
        Opcode::Branch8,
        Opcode::Branch32,
        Opcode::Branch64,
        Opcode::BranchTest8,
        Opcode::BranchTest32,
        Opcode::BranchTest64,
        Opcode::BranchFloat,
        Opcode::BranchDouble,
        Opcode::BranchAdd32,
        Opcode::BranchAdd64,
        Opcode::BranchMul32,
        Opcode::BranchMul64,
        Opcode::BranchSub32,
        Opcode::BranchSub64,
        Opcode::BranchNeg32,
        Opcode::BranchNeg64,
        Opcode::BranchAtomicStrongCAS8,
        Opcode::BranchAtomicStrongCAS16,
        Opcode::BranchAtomicStrongCAS32,
        Opcode::BranchAtomicStrongCAS64,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Nop => "Nop",
            Opcode::Move => "Move",
            Opcode::Move32 => "Move32",
            Opcode::Add32 => "Add32",
            Opcode::Add64 => "Add64",
            Opcode::Sub32 => "Sub32",
            Opcode::Sub64 => "Sub64",
            Opcode::Jump => "Jump",
            Opcode::Ret32 => "Ret32",
            Opcode::Ret64 => "Ret64",
            Opcode::Oops => "Oops",
            Opcode::Branch8 => "Branch8",
            Opcode::Branch32 => "Branch32",
            Opcode::Branch64 => "Branch64",
            Opcode::BranchTest8 => "BranchTest8",
            Opcode::BranchTest32 => "BranchTest32",
            Opcode::BranchTest64 => "BranchTest64",
            Opcode::BranchFloat => "BranchFloat",
            Opcode::BranchDouble => "BranchDouble",
            Opcode::BranchAdd32 => "BranchAdd32",
            Opcode::BranchAdd64 => "BranchAdd64",
            Opcode::BranchMul32 => "BranchMul32",
            Opcode::BranchMul64 => "BranchMul64",
            Opcode::BranchSub32 => "BranchSub32",
            Opcode::BranchSub64 => "BranchSub64",
            Opcode::BranchNeg32 => "BranchNeg32",
            Opcode::BranchNeg64 => "BranchNeg64",
            Opcode::BranchAtomicStrongCAS8 => "BranchAtomicStrongCAS8",
            Opcode::BranchAtomicStrongCAS16 => "BranchAtomicStrongCAS16",
            Opcode::BranchAtomicStrongCAS32 => "BranchAtomicStrongCAS32",
            Opcode::BranchAtomicStrongCAS64 => "BranchAtomicStrongCAS64",
        }
    }

    pub fn from_name(name: &str) -> Option<Opcode> {
        Opcode::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Does this opcode end a basic block?
    pub fn is_terminal(self) -> bool {
        matches!(self, Opcode::Jump | Opcode::Ret32 | Opcode::Ret64 | Opcode::Oops)
            || self.condition_kind().is_some()
    }

    /// Number of successor edges a block ending in this opcode must have.
    pub fn num_successors(self) -> usize {
        match self {
            Opcode::Jump => 1,
            _ if self.condition_kind().is_some() => 2,
            _ => 0,
        }
    }

    /// Condition family tested by a two-way branch, `None` for anything else.
    ///
    /// For every branch the condition is `args[0]`; successor 0 is taken when
    /// it holds and successor 1 otherwise.
    pub fn condition_kind(self) -> Option<ConditionKind> {
        match self {
            Opcode::Branch8 | Opcode::Branch32 | Opcode::Branch64 => {
                Some(ConditionKind::Relational)
            }
            Opcode::BranchTest8
            | Opcode::BranchTest32
            | Opcode::BranchTest64
            | Opcode::BranchAdd32
            | Opcode::BranchAdd64
            | Opcode::BranchMul32
            | Opcode::BranchMul64
            | Opcode::BranchSub32
            | Opcode::BranchSub64
            | Opcode::BranchNeg32
            | Opcode::BranchNeg64 => Some(ConditionKind::Result),
            Opcode::BranchFloat | Opcode::BranchDouble => Some(ConditionKind::Double),
            Opcode::BranchAtomicStrongCAS8
            | Opcode::BranchAtomicStrongCAS16
            | Opcode::BranchAtomicStrongCAS32
            | Opcode::BranchAtomicStrongCAS64 => Some(ConditionKind::Status),
            _ => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_name(op.name()), Some(op));
        }
        assert_eq!(Opcode::from_name("successors"), None);
        assert_eq!(Opcode::from_name("block0"), None);
    }

    #[test]
    fn test_successor_counts() {
        assert_eq!(Opcode::Jump.num_successors(), 1);
        assert_eq!(Opcode::Ret32.num_successors(), 0);
        assert_eq!(Opcode::Oops.num_successors(), 0);
        assert_eq!(Opcode::BranchAdd32.num_successors(), 2);
        assert_eq!(Opcode::Move.num_successors(), 0);
    }

    #[test]
    fn test_terminals() {
        assert!(Opcode::Jump.is_terminal());
        assert!(Opcode::BranchAtomicStrongCAS16.is_terminal());
        assert!(!Opcode::Add64.is_terminal());
    }

    #[test]
    fn test_branch_family_size() {
        let branches = Opcode::ALL
            .iter()
            .filter(|op| op.condition_kind().is_some())
            .count();
        assert_eq!(branches, 20);
    }
}
