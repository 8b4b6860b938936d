use crate::ast::*;

/// Renders a parsed program back to source-shaped text. Parsing the
/// output yields a structurally identical AST; the text is not promised
/// to match the original byte for byte.
pub fn format_program(p: &Program) -> String {
    let mut out = String::new();
    for s in &p.statements {
        fmt_stmt(s, 0, &mut out);
        out.push('\n');
    }
    out
}

fn indent(n: usize, out: &mut String) {
    for _ in 0..n {
        out.push_str("    ");
    }
}

fn fmt_stmt(s: &Stmt, ind: usize, out: &mut String) {
    match s {
        Stmt::Action { kind, count } => {
            indent(ind, out);
            out.push_str(action_word(*kind));
            if let Some(count) = count {
                out.push('(');
                fmt_expr(count, out);
                out.push(')');
            }
            out.push(';');
        }
        Stmt::Loop(body) => {
            indent(ind, out);
            out.push_str("loop ");
            fmt_block(body, ind, out);
        }
        Stmt::While { cond, body } => {
            indent(ind, out);
            out.push_str("while (");
            fmt_cond(cond, out);
            out.push_str(") ");
            fmt_block(body, ind, out);
        }
        Stmt::If {
            cond,
            then_block,
            elif_clauses,
            else_block,
        } => {
            indent(ind, out);
            out.push_str("if (");
            fmt_cond(cond, out);
            out.push_str(") ");
            fmt_block(then_block, ind, out);
            for (elif_cond, elif_block) in elif_clauses {
                out.push_str(" elif (");
                fmt_cond(elif_cond, out);
                out.push_str(") ");
                fmt_block(elif_block, ind, out);
            }
            if let Some(block) = else_block {
                out.push_str(" else ");
                fmt_block(block, ind, out);
            }
        }
        Stmt::Assign { name, value } => {
            indent(ind, out);
            out.push('$');
            out.push_str(name);
            out.push_str(" = ");
            fmt_expr(value, out);
            out.push(';');
        }
    }
}

fn fmt_block(b: &Block, ind: usize, out: &mut String) {
    out.push_str("{\n");
    for s in &b.statements {
        fmt_stmt(s, ind + 1, out);
        out.push('\n');
    }
    indent(ind, out);
    out.push('}');
}

fn fmt_expr(e: &Expr, out: &mut String) {
    match e {
        Expr::Number(n) => out.push_str(&n.to_string()),
        Expr::Var(name) => {
            out.push('$');
            out.push_str(name);
        }
        Expr::Sensor { kind, index } => {
            out.push_str(sensor_word(*kind));
            if let Some(index) = index {
                out.push('(');
                fmt_expr(index, out);
                out.push(')');
            }
        }
        Expr::Binary { op, left, right } => {
            out.push_str(match op {
                ArithOp::Add => "add",
                ArithOp::Sub => "sub",
                ArithOp::Mul => "mul",
                ArithOp::Div => "div",
            });
            out.push('(');
            fmt_expr(left, out);
            out.push_str(", ");
            fmt_expr(right, out);
            out.push(')');
        }
    }
}

fn fmt_cond(c: &Cond, out: &mut String) {
    match c {
        Cond::Compare { op, left, right } => {
            out.push_str(match op {
                CmpOp::Gt => "gt",
                CmpOp::Lt => "lt",
                CmpOp::Eq => "eq",
            });
            out.push('(');
            fmt_expr(left, out);
            out.push_str(", ");
            fmt_expr(right, out);
            out.push(')');
        }
        Cond::And(a, b) => fmt_cond_pair("and", a, b, out),
        Cond::Or(a, b) => fmt_cond_pair("or", a, b, out),
        Cond::Not(inner) => {
            out.push_str("not(");
            fmt_cond(inner, out);
            out.push(')');
        }
    }
}

fn fmt_cond_pair(word: &str, a: &Cond, b: &Cond, out: &mut String) {
    out.push_str(word);
    out.push('(');
    fmt_cond(a, out);
    out.push_str(", ");
    fmt_cond(b, out);
    out.push(')');
}

fn action_word(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Move => "move",
        ActionKind::TurnL => "turnL",
        ActionKind::TurnR => "turnR",
        ActionKind::TurnAround => "turnAround",
        ActionKind::ShieldOn => "shieldOn",
        ActionKind::ShieldOff => "shieldOff",
        ActionKind::TakeFuel => "takeFuel",
        ActionKind::Wait => "wait",
    }
}

fn sensor_word(kind: SensorKind) -> &'static str {
    match kind {
        SensorKind::FuelLeft => "fuelLeft",
        SensorKind::OppLR => "oppLR",
        SensorKind::OppFB => "oppFB",
        SensorKind::NumBarrels => "numBarrels",
        SensorKind::WallDist => "wallDist",
        SensorKind::BarrelLR => "barrelLR",
        SensorKind::BarrelFB => "barrelFB",
    }
}
