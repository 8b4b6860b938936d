#[cfg(test)]
mod tests {
    use crate::eval::RuntimeError;
    use crate::host::Action;
    use crate::{Interpreter, Parser, TraceRobot};
    use pretty_assertions::assert_eq;

    fn run_with(src: &str, robot: TraceRobot) -> Interpreter<TraceRobot> {
        let program = Parser::new(src).parse_program().expect("parse");
        let mut interp = Interpreter::with_robot(robot);
        interp.run(&program).expect("run");
        interp
    }

    fn run(src: &str) -> Interpreter<TraceRobot> {
        run_with(src, TraceRobot::new())
    }

    fn run_err(src: &str) -> RuntimeError {
        let program = Parser::new(src).parse_program().expect("parse");
        let mut interp = Interpreter::with_robot(TraceRobot::new());
        interp.run(&program).expect_err("should fail at runtime")
    }

    #[test]
    fn count_expression_repeats_the_action() {
        let interp = run("move(add(2, 3));");
        assert_eq!(interp.robot.log, vec![Action::Move; 5]);
    }

    #[test]
    fn default_count_is_one() {
        let interp = run("move; wait;");
        assert_eq!(interp.robot.log, vec![Action::Move, Action::Wait]);
    }

    #[test]
    fn non_positive_count_does_nothing() {
        let interp = run("move(0); wait(sub(1, 3));");
        assert!(interp.robot.log.is_empty());
    }

    #[test]
    fn actions_reach_the_robot_in_order() {
        let interp = run("turnL; turnR; turnAround; shieldOn; takeFuel; shieldOff;");
        assert_eq!(
            interp.robot.log,
            vec![
                Action::TurnLeft,
                Action::TurnRight,
                Action::TurnAround,
                Action::ShieldOn,
                Action::TakeFuel,
                Action::ShieldOff,
            ]
        );
        assert!(!interp.robot.shield);
    }

    #[test]
    fn if_first_match_wins() {
        let src = "$x = 1; \
                   if (eq($x, 0)) { turnL; } \
                   elif (eq($x, 1)) { turnR; } \
                   elif (gt($x, 0)) { wait; } \
                   else { move; }";
        let interp = run(src);
        // the second elif also holds, but only the first match runs
        assert_eq!(interp.robot.log, vec![Action::TurnRight]);
    }

    #[test]
    fn if_without_match_runs_else() {
        let interp = run("$x = 7; if (eq($x, 0)) { turnL; } else { move; }");
        assert_eq!(interp.robot.log, vec![Action::Move]);
    }

    #[test]
    fn if_without_match_and_without_else_runs_nothing() {
        let interp = run("if (eq(0, 1)) { turnL; }");
        assert!(interp.robot.log.is_empty());
    }

    #[test]
    fn while_body_can_run_zero_times() {
        let mut robot = TraceRobot::new();
        robot.fuel = 50;
        let interp = run_with("while (gt(fuelLeft, 100)) { move; }", robot);
        assert!(interp.robot.log.is_empty());
    }

    #[test]
    fn while_rechecks_condition_each_iteration() {
        let mut robot = TraceRobot::new();
        robot.fuel = 3;
        // the trace robot drains one fuel per move
        let interp = run_with("while (gt(fuelLeft, 0)) { move; }", robot);
        assert_eq!(interp.robot.log, vec![Action::Move; 3]);
    }

    #[test]
    fn rebinding_overwrites() {
        let mut interp = run("$x = add($x, 1); $x = add($x, 1);");
        assert_eq!(interp.env.get("x"), 2);
    }

    #[test]
    fn variable_reads_materialize_zero_entries() {
        let mut interp = run("$y = $x;");
        assert_eq!(interp.env.len(), 2);
        assert_eq!(interp.env.get("x"), 0);
        assert_eq!(interp.env.get("y"), 0);
    }

    #[test]
    fn division_truncates() {
        let mut interp = run("$a = div(7, 2); $b = div(-7, 2);");
        assert_eq!(interp.env.get("a"), 3);
        assert_eq!(interp.env.get("b"), -3);
    }

    #[test]
    fn division_by_zero_fails() {
        assert_eq!(run_err("$x = div(10, 0);"), RuntimeError::DivisionByZero);
    }

    #[test]
    fn conditions_do_not_short_circuit() {
        // a short-circuiting `and` would never evaluate the right side
        let err = run_err("if (and(eq(0, 1), eq(div(1, 0), 0))) { move; }");
        assert_eq!(err, RuntimeError::DivisionByZero);
        let err = run_err("if (or(eq(0, 0), eq(div(1, 0), 0))) { move; }");
        assert_eq!(err, RuntimeError::DivisionByZero);
    }

    #[test]
    fn not_negates() {
        let interp = run("if (not(eq(0, 1))) { move; }");
        assert_eq!(interp.robot.log, vec![Action::Move]);
    }

    #[test]
    fn sensors_read_through_the_capability_interface() {
        let mut robot = TraceRobot::new();
        robot.fuel = 42;
        robot.opponent = (3, -2);
        robot.wall = 5;
        robot.barrels = vec![(1, 2), (-3, 4)];
        let src = "$fuel = fuelLeft; $lr = oppLR; $fb = oppFB; \
                   $wall = wallDist; $n = numBarrels; \
                   $closest = barrelLR; $second = barrelFB(1); $gone = barrelLR(9);";
        let mut interp = run_with(src, robot);
        assert_eq!(interp.env.get("fuel"), 42);
        assert_eq!(interp.env.get("lr"), 3);
        assert_eq!(interp.env.get("fb"), -2);
        assert_eq!(interp.env.get("wall"), 5);
        assert_eq!(interp.env.get("n"), 2);
        assert_eq!(interp.env.get("closest"), 1);
        assert_eq!(interp.env.get("second"), 4);
        // out-of-range barrel index reads as 0, not an error
        assert_eq!(interp.env.get("gone"), 0);
    }

    #[test]
    fn loop_runs_until_the_step_budget() {
        let program = Parser::new("loop { move; }").parse_program().expect("parse");
        let mut interp = Interpreter::with_robot(TraceRobot::new()).with_step_limit(50);
        assert_eq!(
            interp.run(&program),
            Err(RuntimeError::StepBudgetExhausted { limit: 50 })
        );
        assert!(!interp.robot.log.is_empty());
    }

    #[test]
    fn untaken_loop_costs_nothing() {
        let interp = run("if (eq(0, 1)) { loop { move; } }");
        assert!(interp.robot.log.is_empty());
    }

    #[test]
    fn program_reruns_against_fresh_environments() {
        let program = Parser::new("$x = add($x, 1); move($x);")
            .parse_program()
            .expect("parse");
        for _ in 0..2 {
            let mut interp = Interpreter::with_robot(TraceRobot::new());
            interp.run(&program).expect("run");
            assert_eq!(interp.robot.log, vec![Action::Move]);
            assert_eq!(interp.env.get("x"), 1);
        }
    }

    #[test]
    fn shield_state_follows_the_last_action() {
        let interp = run("shieldOn;");
        assert!(interp.robot.shield);
        let interp = run("shieldOn; shieldOff;");
        assert!(!interp.robot.shield);
    }
}
