use crate::ast::*;
use crate::env::Env;
use crate::host::Robot;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("step budget of {limit} exhausted")]
    StepBudgetExhausted { limit: u64 },
}

/// Tree-walking interpreter. Owns the variable environment for one run
/// and the robot it drives; the program itself is borrowed and can be
/// executed again later against a fresh interpreter.
pub struct Interpreter<R: Robot> {
    pub env: Env,
    pub robot: R,
    step_limit: Option<u64>,
    steps: u64,
}

impl<R: Robot> Interpreter<R> {
    pub fn with_robot(robot: R) -> Self {
        Self {
            env: Env::new(),
            robot,
            step_limit: None,
            steps: 0,
        }
    }

    /// Bound a run to `limit` steps (statement executions and robot
    /// invocations). The language itself has no way out of `loop`; this
    /// is the cooperative cancellation hook for embedders that need one.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Steps consumed by the last `run`.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        self.steps = 0;
        for s in &program.statements {
            self.exec_stmt(s)?;
        }
        Ok(())
    }

    fn tick(&mut self) -> Result<(), RuntimeError> {
        self.steps += 1;
        match self.step_limit {
            Some(limit) if self.steps > limit => Err(RuntimeError::StepBudgetExhausted { limit }),
            _ => Ok(()),
        }
    }

    fn exec_block(&mut self, block: &Block) -> Result<(), RuntimeError> {
        for s in &block.statements {
            self.exec_stmt(s)?;
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        self.tick()?;
        match stmt {
            Stmt::Action { kind, count } => {
                let times = match count {
                    Some(expr) => self.eval_expr(expr)?.max(0),
                    // no argument parsed: the bare kinds and plain move/wait
                    None => 1,
                };
                for _ in 0..times {
                    self.perform(*kind)?;
                }
                Ok(())
            }
            Stmt::Loop(body) => loop {
                self.exec_block(body)?;
            },
            Stmt::While { cond, body } => {
                while self.eval_cond(cond)? {
                    self.exec_block(body)?;
                }
                Ok(())
            }
            Stmt::If {
                cond,
                then_block,
                elif_clauses,
                else_block,
            } => {
                if self.eval_cond(cond)? {
                    return self.exec_block(then_block);
                }
                for (elif_cond, elif_block) in elif_clauses {
                    if self.eval_cond(elif_cond)? {
                        return self.exec_block(elif_block);
                    }
                }
                if let Some(block) = else_block {
                    return self.exec_block(block);
                }
                Ok(())
            }
            Stmt::Assign { name, value } => {
                let v = self.eval_expr(value)?;
                self.env.set(name, v);
                Ok(())
            }
        }
    }

    fn perform(&mut self, kind: ActionKind) -> Result<(), RuntimeError> {
        self.tick()?;
        match kind {
            ActionKind::Move => self.robot.move_forward(),
            ActionKind::TurnL => self.robot.turn_left(),
            ActionKind::TurnR => self.robot.turn_right(),
            ActionKind::TurnAround => self.robot.turn_around(),
            ActionKind::ShieldOn => self.robot.set_shield(true),
            ActionKind::ShieldOff => self.robot.set_shield(false),
            ActionKind::TakeFuel => self.robot.take_fuel(),
            ActionKind::Wait => self.robot.idle_wait(),
        }
        Ok(())
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<i64, RuntimeError> {
        Ok(match expr {
            Expr::Number(n) => *n,
            // reads materialize a zero entry for unbound names
            Expr::Var(name) => self.env.get(name),
            Expr::Sensor { kind, index } => {
                let index = match index {
                    Some(expr) => self.eval_expr(expr)?,
                    None => 0,
                };
                match kind {
                    SensorKind::FuelLeft => self.robot.fuel(),
                    SensorKind::OppLR => self.robot.opponent_lr(),
                    SensorKind::OppFB => self.robot.opponent_fb(),
                    SensorKind::NumBarrels => self.robot.num_barrels(),
                    SensorKind::WallDist => self.robot.wall_distance(),
                    SensorKind::BarrelLR => self.robot.barrel_lr(index),
                    SensorKind::BarrelFB => self.robot.barrel_fb(index),
                }
            }
            Expr::Binary { op, left, right } => {
                let l = self.eval_expr(left)?;
                let r = self.eval_expr(right)?;
                match op {
                    ArithOp::Add => l.wrapping_add(r),
                    ArithOp::Sub => l.wrapping_sub(r),
                    ArithOp::Mul => l.wrapping_mul(r),
                    ArithOp::Div => {
                        if r == 0 {
                            return Err(RuntimeError::DivisionByZero);
                        }
                        l.wrapping_div(r)
                    }
                }
            }
        })
    }

    fn eval_cond(&mut self, cond: &Cond) -> Result<bool, RuntimeError> {
        Ok(match cond {
            Cond::Compare { op, left, right } => {
                let l = self.eval_expr(left)?;
                let r = self.eval_expr(right)?;
                match op {
                    CmpOp::Gt => l > r,
                    CmpOp::Lt => l < r,
                    CmpOp::Eq => l == r,
                }
            }
            // no short-circuiting: sensor reads on both sides must happen
            Cond::And(a, b) => {
                let a = self.eval_cond(a)?;
                let b = self.eval_cond(b)?;
                a && b
            }
            Cond::Or(a, b) => {
                let a = self.eval_cond(a)?;
                let b = self.eval_cond(b)?;
                a || b
            }
            Cond::Not(inner) => !self.eval_cond(inner)?,
        })
    }
}
