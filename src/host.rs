/// The capability surface the interpreter drives. Actions are assumed to
/// always succeed; sensors are read-only integer queries. The robot's
/// physics, fuel accounting and scheduling live behind this boundary.
pub trait Robot {
    fn move_forward(&mut self);
    fn turn_left(&mut self);
    fn turn_right(&mut self);
    fn turn_around(&mut self);
    fn set_shield(&mut self, on: bool);
    fn take_fuel(&mut self);
    fn idle_wait(&mut self);

    fn fuel(&self) -> i64;
    fn opponent_lr(&self) -> i64;
    fn opponent_fb(&self) -> i64;
    fn num_barrels(&self) -> i64;
    fn wall_distance(&self) -> i64;
    /// Left/right offset of the barrel at `index` (0 = closest). An index
    /// with no barrel behind it should read as 0, not fail.
    fn barrel_lr(&self, index: i64) -> i64;
    fn barrel_fb(&self, index: i64) -> i64;
}

/// One observed robot action, in invocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move,
    TurnLeft,
    TurnRight,
    TurnAround,
    ShieldOn,
    ShieldOff,
    TakeFuel,
    Wait,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Action::Move => "move",
            Action::TurnLeft => "turnL",
            Action::TurnRight => "turnR",
            Action::TurnAround => "turnAround",
            Action::ShieldOn => "shieldOn",
            Action::ShieldOff => "shieldOff",
            Action::TakeFuel => "takeFuel",
            Action::Wait => "wait",
        })
    }
}

/// Scripted robot used by tests, the CLI runner and the REPL: records
/// every action into `log` and answers sensor reads from plain fields.
/// `move` and `wait` drain one unit of fuel (floor 0) so fuel-guarded
/// loops written against it terminate.
#[derive(Debug, Clone)]
pub struct TraceRobot {
    pub log: Vec<Action>,
    pub fuel: i64,
    pub opponent: (i64, i64),
    pub wall: i64,
    /// (lr, fb) per barrel, closest first.
    pub barrels: Vec<(i64, i64)>,
    pub shield: bool,
}

impl Default for TraceRobot {
    fn default() -> Self {
        Self {
            log: Vec::new(),
            fuel: 100,
            opponent: (0, 0),
            wall: 0,
            barrels: Vec::new(),
            shield: false,
        }
    }
}

impl TraceRobot {
    pub fn new() -> Self {
        Self::default()
    }

    fn barrel(&self, index: i64) -> Option<(i64, i64)> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.barrels.get(i).copied())
    }
}

impl Robot for TraceRobot {
    fn move_forward(&mut self) {
        self.fuel = (self.fuel - 1).max(0);
        self.log.push(Action::Move);
    }
    fn turn_left(&mut self) {
        self.log.push(Action::TurnLeft);
    }
    fn turn_right(&mut self) {
        self.log.push(Action::TurnRight);
    }
    fn turn_around(&mut self) {
        self.log.push(Action::TurnAround);
    }
    fn set_shield(&mut self, on: bool) {
        self.shield = on;
        self.log
            .push(if on { Action::ShieldOn } else { Action::ShieldOff });
    }
    fn take_fuel(&mut self) {
        self.log.push(Action::TakeFuel);
    }
    fn idle_wait(&mut self) {
        self.fuel = (self.fuel - 1).max(0);
        self.log.push(Action::Wait);
    }

    fn fuel(&self) -> i64 {
        self.fuel
    }
    fn opponent_lr(&self) -> i64 {
        self.opponent.0
    }
    fn opponent_fb(&self) -> i64 {
        self.opponent.1
    }
    fn num_barrels(&self) -> i64 {
        self.barrels.len() as i64
    }
    fn wall_distance(&self) -> i64 {
        self.wall
    }
    fn barrel_lr(&self, index: i64) -> i64 {
        self.barrel(index).map(|b| b.0).unwrap_or(0)
    }
    fn barrel_fb(&self, index: i64) -> i64 {
        self.barrel(index).map(|b| b.1).unwrap_or(0)
    }
}
