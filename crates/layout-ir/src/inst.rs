//! Instructions and their arguments.

use alloc::vec::Vec;
use core::fmt;

use crate::{
    condcodes::{DoubleCondition, RelationalCondition, ResultCondition, StatusCondition},
    entity::Tmp,
    opcode::{ConditionKind, Opcode},
};

/// An instruction argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    Tmp(Tmp),
    Imm(i64),
    RelCond(RelationalCondition),
    ResCond(ResultCondition),
    DoubleCond(DoubleCondition),
    StatusCond(StatusCondition),
}

impl Arg {
    /// Condition family of this argument, if it is a condition at all.
    pub fn condition_kind(&self) -> Option<ConditionKind> {
        match self {
            Arg::RelCond(_) => Some(ConditionKind::Relational),
            Arg::ResCond(_) => Some(ConditionKind::Result),
            Arg::DoubleCond(_) => Some(ConditionKind::Double),
            Arg::StatusCond(_) => Some(ConditionKind::Status),
            Arg::Tmp(_) | Arg::Imm(_) => None,
        }
    }

    /// The logical negation of this condition, if one exists.
    pub fn inverted(&self) -> Option<Arg> {
        match *self {
            Arg::RelCond(cond) => Some(Arg::RelCond(cond.inverted())),
            Arg::ResCond(cond) => cond.inverted().map(Arg::ResCond),
            Arg::DoubleCond(cond) => Some(Arg::DoubleCond(cond.inverted())),
            Arg::StatusCond(cond) => Some(Arg::StatusCond(cond.inverted())),
            Arg::Tmp(_) | Arg::Imm(_) => None,
        }
    }

    pub fn is_invertible(&self) -> bool {
        self.inverted().is_some()
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Tmp(tmp) => write!(f, "{}", tmp),
            Arg::Imm(value) => write!(f, "${}", value),
            Arg::RelCond(cond) => write!(f, "{}", cond),
            Arg::ResCond(cond) => write!(f, "{}", cond),
            Arg::DoubleCond(cond) => write!(f, "{}", cond),
            Arg::StatusCond(cond) => write!(f, "{}", cond),
        }
    }
}

/// A low-level instruction: an opcode applied to a list of arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Inst {
    pub opcode: Opcode,
    pub args: Vec<Arg>,
}

impl Inst {
    pub fn new(opcode: Opcode, args: Vec<Arg>) -> Self {
        Self { opcode, args }
    }

    pub fn jump() -> Self {
        Self::new(Opcode::Jump, Vec::new())
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i == 0 {
                write!(f, " {}", arg)?;
            } else {
                write!(f, ", {}", arg)?;
            }
        }
        Ok(())
    }
}
