//! Robot navigation state machine
//!
//! The robot drives in straight lines to a point in front of its target
//! exhibit, scans it on arrival and then either moves on (tour), stops
//! (manual selection) or heads home. [`Navigator::update`] is called once per
//! frame with the elapsed time and is a no-op while [`NavState::Idle`].

use std::f32::consts::FRAC_PI_2;

use cgmath::{Deg, InnerSpace, Rad, Vector3};

use crate::config::RobotConfig;

use super::exhibit::ExhibitRegistry;

/// Distance at which the robot counts as arrived
pub const ARRIVAL_THRESHOLD: f32 = 0.1;
/// Inside this distance of the goal the arm keeps its pose
pub const ARM_HOLD_DISTANCE: f32 = 0.2;
/// How far in front (towards -z) of an exhibit the robot stops
pub const APPROACH_OFFSET: f32 = 1.5;
/// Arm pose held while presenting a freshly scanned exhibit
pub const SCAN_ARM_ANGLE: Deg<f32> = Deg(45.0);
/// Arm relaxation speed, per second
pub const ARM_RELAX_RATE: Deg<f32> = Deg(90.0);

/// Why the robot is heading for an exhibit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    /// Visiting every exhibit in order
    Tour,
    /// Sent to a single exhibit from the UI
    Manual,
}

/// Current objective of the robot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Seeking { target: usize, mode: TravelMode },
    ReturningHome,
}

/// Things that happened during one update, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// The exhibit at this index was scanned for the first time
    Scanned(usize),
    /// The last exhibit of a tour was reached
    TourFinished,
    ArrivedHome,
}

/// Continuous pose of the robot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotState {
    pub position: Vector3<f32>,
    home: Vector3<f32>,
    /// Heading around +y in radians; 0 faces +z
    pub yaw: f32,
    /// Arm lift in radians, always within `[0, π/2]`
    arm_angle: f32,
    move_speed: f32,
}

impl RobotState {
    pub fn home(&self) -> Vector3<f32> {
        self.home
    }

    pub fn arm_angle(&self) -> f32 {
        self.arm_angle
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }
}

/// Drives the robot between exhibits
#[derive(Debug, Clone)]
pub struct Navigator {
    robot: RobotState,
    state: NavState,
}

impl Navigator {
    /// Robot parked at its home position, idle
    pub fn new(config: &RobotConfig) -> Self {
        Self {
            robot: RobotState {
                position: config.home,
                home: config.home,
                yaw: Rad::from(config.heading).0,
                arm_angle: 0.0,
                move_speed: config.move_speed,
            },
            state: NavState::Idle,
        }
    }

    pub fn robot(&self) -> &RobotState {
        &self.robot
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    /// Whether a tour is in progress
    pub fn auto_mode(&self) -> bool {
        matches!(
            self.state,
            NavState::Seeking {
                mode: TravelMode::Tour,
                ..
            }
        )
    }

    pub fn target(&self) -> Option<usize> {
        match self.state {
            NavState::Seeking { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn has_objective(&self) -> bool {
        self.state != NavState::Idle
    }

    /// Clears every scan and heads for the first exhibit
    pub fn start_tour(&mut self, exhibits: &mut ExhibitRegistry) {
        exhibits.reset_scans();
        self.state = if exhibits.is_empty() {
            NavState::ReturningHome
        } else {
            NavState::Seeking {
                target: 0,
                mode: TravelMode::Tour,
            }
        };
        log::info!("Starting tour of {} exhibits", exhibits.len());
    }

    /// Abandons the current objective and drives home
    pub fn stop(&mut self) {
        self.state = NavState::ReturningHome;
        log::info!("Robot returning home");
    }

    /// Sends the robot to a single exhibit, which will be scanned again
    ///
    /// Returns `false` and changes nothing if `index` is not in the registry.
    pub fn select(&mut self, index: usize, exhibits: &mut ExhibitRegistry) -> bool {
        let Some(exhibit) = exhibits.get_mut(index) else {
            log::debug!("Ignoring selection of exhibit {}", index);
            return false;
        };
        exhibit.scanned = false;
        self.state = NavState::Seeking {
            target: index,
            mode: TravelMode::Manual,
        };
        log::info!("Robot heading to '{}'", exhibit.name);
        true
    }

    /// Sets the arm angle directly, clamped to `[0, π/2]`
    pub fn set_arm_angle(&mut self, radians: f32) {
        if radians.is_finite() {
            self.robot.arm_angle = radians.clamp(0.0, FRAC_PI_2);
        }
    }

    /// Point the robot is currently driving towards
    ///
    /// Exhibit goals sit in front of the exhibit at the robot's own height.
    pub fn goal(&self, exhibits: &ExhibitRegistry) -> Option<Vector3<f32>> {
        match self.state {
            NavState::Idle => None,
            NavState::ReturningHome => Some(self.robot.home),
            NavState::Seeking { target, .. } => exhibits.get(target).map(|exhibit| {
                Vector3::new(
                    exhibit.position.x,
                    self.robot.position.y,
                    exhibit.position.z - APPROACH_OFFSET,
                )
            }),
        }
    }

    /// Advances the robot by `dt` seconds
    ///
    /// Negative or NaN frame times are treated as zero.
    pub fn update(&mut self, dt: f32, exhibits: &mut ExhibitRegistry) -> Vec<NavEvent> {
        let mut events = Vec::new();
        let dt = dt.max(0.0);

        let Some(goal) = self.goal(exhibits) else {
            if let NavState::Seeking { target, .. } = self.state {
                log::warn!("Exhibit {} vanished, returning home", target);
                self.state = NavState::ReturningHome;
            }
            return events;
        };

        let offset = goal - self.robot.position;
        let distance = offset.magnitude();

        if distance > ARRIVAL_THRESHOLD {
            let direction = offset / distance;
            self.robot.yaw = direction.x.atan2(direction.z);
            // Never step past the goal, so long frames cannot oscillate around it.
            let step = (self.robot.move_speed * dt).min(distance);
            self.robot.position += direction * step;
        } else {
            self.arrive(exhibits, &mut events);
        }

        self.relax_arm(dt, distance);
        events
    }

    fn arrive(&mut self, exhibits: &mut ExhibitRegistry, events: &mut Vec<NavEvent>) {
        match self.state {
            NavState::Idle => {}
            NavState::ReturningHome => {
                self.state = NavState::Idle;
                log::info!("Robot is home");
                events.push(NavEvent::ArrivedHome);
            }
            NavState::Seeking { target, mode } => {
                if let Some(exhibit) = exhibits.get_mut(target) {
                    if !exhibit.scanned {
                        exhibit.scanned = true;
                        self.robot.arm_angle = Rad::from(SCAN_ARM_ANGLE).0;
                        log::info!("Scanned '{}'", exhibit.name);
                        events.push(NavEvent::Scanned(target));
                    }
                }

                self.state = match mode {
                    TravelMode::Manual => NavState::Idle,
                    TravelMode::Tour if target + 1 < exhibits.len() => NavState::Seeking {
                        target: target + 1,
                        mode,
                    },
                    TravelMode::Tour => {
                        log::info!("Tour complete");
                        events.push(NavEvent::TourFinished);
                        NavState::ReturningHome
                    }
                };
            }
        }
    }

    /// Lowers the arm while travelling
    ///
    /// `distance` is measured before this tick's transition, so the tick that
    /// raises the arm for a scan leaves it raised.
    fn relax_arm(&mut self, dt: f32, distance: f32) {
        if self.robot.arm_angle <= 0.0 {
            return;
        }
        if distance > ARM_HOLD_DISTANCE {
            let relaxed = self.robot.arm_angle - Rad::from(ARM_RELAX_RATE).0 * dt;
            self.robot.arm_angle = relaxed.max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MuseumConfig;
    use crate::gfx::scene::MeshCatalog;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const DT: f32 = 1.0 / 60.0;
    const MAX_STEPS: usize = 100_000;

    fn museum() -> (Navigator, ExhibitRegistry) {
        let config = MuseumConfig::default();
        let cube = MeshCatalog::new().register("cube", &[]);
        (Navigator::new(&config.robot), ExhibitRegistry::museum(cube))
    }

    /// Steps until the robot is idle, collecting every event
    fn run_until_idle(
        nav: &mut Navigator,
        exhibits: &mut ExhibitRegistry,
        mut next_dt: impl FnMut() -> f32,
    ) -> Vec<NavEvent> {
        let mut events = Vec::new();
        for _ in 0..MAX_STEPS {
            if !nav.has_objective() {
                return events;
            }
            events.extend(nav.update(next_dt(), exhibits));
            assert!(nav.robot().arm_angle() >= 0.0);
            assert!(nav.robot().arm_angle() <= FRAC_PI_2);
        }
        panic!("robot never settled: {:?}", nav.state());
    }

    #[test]
    fn test_starts_idle_at_home() {
        let (nav, _) = museum();
        assert_eq!(nav.state(), NavState::Idle);
        assert_eq!(nav.robot().position, Vector3::new(0.0, 0.25, 6.0));
        assert!((nav.robot().yaw - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(nav.robot().arm_angle(), 0.0);
        assert!(!nav.auto_mode());
    }

    #[test]
    fn test_manual_select_scans_target() {
        let (mut nav, mut exhibits) = museum();
        assert!(nav.select(0, &mut exhibits));
        assert_eq!(nav.target(), Some(0));

        let events = run_until_idle(&mut nav, &mut exhibits, || DT);

        let expected = Vector3::new(-4.0, 0.25, -5.5);
        assert!((nav.robot().position - expected).magnitude() < ARRIVAL_THRESHOLD);
        assert!(exhibits.is_scanned(0));
        assert_eq!(events, vec![NavEvent::Scanned(0)]);
        assert_eq!(nav.state(), NavState::Idle);
        // the exhibit itself never moves
        assert_eq!(exhibits.get(0).unwrap().position, Vector3::new(-4.0, 0.5, -4.0));
    }

    #[test]
    fn test_yaw_faces_final_approach() {
        let (mut nav, mut exhibits) = museum();
        nav.select(0, &mut exhibits);
        run_until_idle(&mut nav, &mut exhibits, || DT);

        // home (0, 6) to goal (-4, -5.5) is a straight line
        let expected = (-4.0f32).atan2(-11.5);
        assert!((nav.robot().yaw - expected).abs() < 1e-4);
    }

    #[test]
    fn test_idle_update_is_noop() {
        let (mut nav, mut exhibits) = museum();
        nav.set_arm_angle(0.3);
        let before = *nav.robot();

        for dt in [0.0, DT, 1.0, 1000.0, -5.0] {
            assert!(nav.update(dt, &mut exhibits).is_empty());
            assert_eq!(*nav.robot(), before);
            assert_eq!(nav.state(), NavState::Idle);
        }
        assert!(exhibits.iter().all(|e| !e.scanned));
    }

    #[test]
    fn test_tour_visits_in_order_and_returns_home() {
        let (mut nav, mut exhibits) = museum();
        nav.start_tour(&mut exhibits);
        assert!(nav.auto_mode());
        assert_eq!(nav.target(), Some(0));

        let events = run_until_idle(&mut nav, &mut exhibits, || DT);

        let scanned: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                NavEvent::Scanned(i) => Some(*i),
                _ => None,
            })
            .collect();
        assert_eq!(scanned, vec![0, 1, 2, 3, 4]);
        assert_eq!(
            &events[events.len() - 2..],
            &[NavEvent::TourFinished, NavEvent::ArrivedHome]
        );

        assert!(!nav.auto_mode());
        assert!((nav.robot().position - nav.robot().home()).magnitude() < ARRIVAL_THRESHOLD);
        assert!(exhibits.iter().all(|e| e.scanned));
        assert_eq!(nav.robot().arm_angle(), 0.0);
    }

    #[test]
    fn test_tour_with_random_frame_times() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..8 {
            let (mut nav, mut exhibits) = museum();
            nav.start_tour(&mut exhibits);

            let events = run_until_idle(&mut nav, &mut exhibits, || rng.random_range(0.0..0.25));

            let scans = events
                .iter()
                .filter(|e| matches!(e, NavEvent::Scanned(_)))
                .count();
            assert_eq!(scans, exhibits.len());
            assert!((nav.robot().position - nav.robot().home()).magnitude() < ARRIVAL_THRESHOLD);
        }
    }

    #[test]
    fn test_restarting_tour_clears_scans() {
        let (mut nav, mut exhibits) = museum();
        exhibits.get_mut(3).unwrap().scanned = true;

        nav.start_tour(&mut exhibits);
        assert!(exhibits.iter().all(|e| !e.scanned));
    }

    #[test]
    fn test_scan_happens_once_per_visit() {
        let (mut nav, mut exhibits) = museum();
        nav.select(0, &mut exhibits);
        let first = run_until_idle(&mut nav, &mut exhibits, || DT);
        assert_eq!(first, vec![NavEvent::Scanned(0)]);

        // already standing at the goal, no second scan until reselected
        for _ in 0..10 {
            assert!(nav.update(DT, &mut exhibits).is_empty());
        }

        nav.select(0, &mut exhibits);
        assert!(!exhibits.is_scanned(0));
        let again = run_until_idle(&mut nav, &mut exhibits, || DT);
        assert_eq!(again, vec![NavEvent::Scanned(0)]);
    }

    #[test]
    fn test_stop_during_tour() {
        let (mut nav, mut exhibits) = museum();
        nav.start_tour(&mut exhibits);

        for _ in 0..MAX_STEPS {
            if nav.target() == Some(2) {
                break;
            }
            nav.update(DT, &mut exhibits);
        }
        assert_eq!(nav.target(), Some(2));

        nav.stop();
        assert_eq!(nav.state(), NavState::ReturningHome);
        assert_eq!(nav.target(), None);
        assert!(!nav.auto_mode());
        assert_eq!(nav.goal(&exhibits), Some(nav.robot().home()));

        let events = run_until_idle(&mut nav, &mut exhibits, || DT);
        assert_eq!(events, vec![NavEvent::ArrivedHome]);
        assert!(!exhibits.is_scanned(2));
    }

    #[test]
    fn test_invalid_selection_is_ignored() {
        let (mut nav, mut exhibits) = museum();
        nav.select(1, &mut exhibits);
        let before = nav.state();

        assert!(!nav.select(exhibits.len(), &mut exhibits));
        assert!(!nav.select(usize::MAX, &mut exhibits));
        assert_eq!(nav.state(), before);
    }

    #[test]
    fn test_zero_dt_does_not_move() {
        let (mut nav, mut exhibits) = museum();
        nav.select(2, &mut exhibits);
        let start = nav.robot().position;

        nav.update(0.0, &mut exhibits);
        nav.update(-1.0, &mut exhibits);
        assert_eq!(nav.robot().position, start);
        assert_eq!(nav.target(), Some(2));
    }

    #[test]
    fn test_long_frame_lands_on_goal() {
        let (mut nav, mut exhibits) = museum();
        nav.select(4, &mut exhibits);

        nav.update(100.0, &mut exhibits);
        let goal = Vector3::new(0.0, 0.25, -7.5);
        assert!((nav.robot().position - goal).magnitude() < 1e-4);

        assert_eq!(nav.update(100.0, &mut exhibits), vec![NavEvent::Scanned(4)]);
        assert_eq!(nav.state(), NavState::Idle);
    }

    #[test]
    fn test_arm_relaxes_once_away() {
        let (mut nav, mut exhibits) = museum();
        nav.select(0, &mut exhibits);
        run_until_idle(&mut nav, &mut exhibits, || DT);

        // manual arrival keeps the presenting pose while idle
        let presenting = Rad::from(SCAN_ARM_ANGLE).0;
        assert!((nav.robot().arm_angle() - presenting).abs() < 1e-6);
        nav.update(1.0, &mut exhibits);
        assert!((nav.robot().arm_angle() - presenting).abs() < 1e-6);

        nav.stop();
        nav.update(0.25, &mut exhibits);
        let half = presenting - Rad::from(ARM_RELAX_RATE).0 * 0.25;
        assert!((nav.robot().arm_angle() - half).abs() < 1e-5);

        for _ in 0..60 {
            nav.update(DT, &mut exhibits);
        }
        assert_eq!(nav.robot().arm_angle(), 0.0);
    }

    #[test]
    fn test_arm_held_near_goal() {
        let (mut nav, mut exhibits) = museum();
        nav.select(4, &mut exhibits);
        nav.set_arm_angle(0.5);

        // goal is 13.5 straight ahead; stop 0.15 short of it
        nav.update((13.5 - 0.15) / 2.0, &mut exhibits);
        let held = nav.robot().arm_angle();
        nav.update(0.01, &mut exhibits);
        assert_eq!(nav.target(), Some(4));
        assert_eq!(nav.robot().arm_angle(), held);

        let (mut nav, mut exhibits) = museum();
        nav.select(4, &mut exhibits);
        nav.set_arm_angle(0.5);
        nav.update(0.1, &mut exhibits);
        let relaxed = 0.5 - Rad::from(ARM_RELAX_RATE).0 * 0.1;
        assert!((nav.robot().arm_angle() - relaxed).abs() < 1e-6);
    }

    #[test]
    fn test_tour_scan_pose_survives_long_frames() {
        let presenting = Rad::from(SCAN_ARM_ANGLE).0;

        for dt in [DT, 0.25, 0.5, 2.0] {
            let (mut nav, mut exhibits) = museum();
            nav.start_tour(&mut exhibits);

            let mut scanned = false;
            for _ in 0..MAX_STEPS {
                if nav.update(dt, &mut exhibits).contains(&NavEvent::Scanned(0)) {
                    scanned = true;
                    break;
                }
            }
            assert!(scanned, "no scan at dt {}", dt);
            assert_eq!(nav.target(), Some(1));
            assert_eq!(nav.robot().arm_angle(), presenting, "dt {}", dt);

            // the arm drops on the way to the next exhibit
            nav.update(0.25, &mut exhibits);
            let lowered = presenting - Rad::from(ARM_RELAX_RATE).0 * 0.25;
            assert!((nav.robot().arm_angle() - lowered).abs() < 1e-5);
        }
    }

    #[test]
    fn test_arm_angle_is_clamped() {
        let (mut nav, _) = museum();
        nav.set_arm_angle(10.0);
        assert_eq!(nav.robot().arm_angle(), FRAC_PI_2);
        nav.set_arm_angle(-1.0);
        assert_eq!(nav.robot().arm_angle(), 0.0);
        nav.set_arm_angle(f32::NAN);
        assert_eq!(nav.robot().arm_angle(), 0.0);
    }

    #[test]
    fn test_empty_registry_tour_goes_home() {
        let config = MuseumConfig::default();
        let mut nav = Navigator::new(&config.robot);
        let mut exhibits = ExhibitRegistry::new();

        nav.start_tour(&mut exhibits);
        assert_eq!(nav.state(), NavState::ReturningHome);
        assert_eq!(nav.update(DT, &mut exhibits), vec![NavEvent::ArrivedHome]);
    }
}
