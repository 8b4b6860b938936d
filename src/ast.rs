use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// A brace-delimited statement sequence. Non-empty by construction: the
/// parser rejects `{ }` before a Block value ever exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Action {
        kind: ActionKind,
        /// Repeat count; only ever present for `move` and `wait`.
        count: Option<Expr>,
    },
    Loop(Block),
    While {
        cond: Cond,
        body: Block,
    },
    If {
        cond: Cond,
        then_block: Block,
        /// Declaration order; it is also the runtime evaluation order.
        elif_clauses: Vec<(Cond, Block)>,
        else_block: Option<Block>,
    },
    Assign {
        name: String,
        value: Expr,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Move,
    TurnL,
    TurnR,
    TurnAround,
    ShieldOn,
    ShieldOff,
    TakeFuel,
    Wait,
}

impl ActionKind {
    /// Whether the grammar lets this action take a repeat-count argument.
    pub fn takes_count(self) -> bool {
        matches!(self, ActionKind::Move | ActionKind::Wait)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Number(i64),
    Var(String),
    Sensor {
        kind: SensorKind,
        /// Barrel selection index; only ever present for `barrelLR`/`barrelFB`.
        index: Option<Box<Expr>>,
    },
    Binary {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorKind {
    FuelLeft,
    OppLR,
    OppFB,
    NumBarrels,
    WallDist,
    BarrelLR,
    BarrelFB,
}

impl SensorKind {
    pub fn takes_index(self) -> bool {
        matches!(self, SensorKind::BarrelLR | SensorKind::BarrelFB)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cond {
    Compare {
        op: CmpOp,
        left: Expr,
        right: Expr,
    },
    And(Box<Cond>, Box<Cond>),
    Or(Box<Cond>, Box<Cond>),
    Not(Box<Cond>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Gt,
    Lt,
    Eq,
}
