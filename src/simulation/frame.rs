//! Per-frame orchestration
//!
//! [`run_frame`] advances the robot, derives its spotlight and submits the
//! whole museum to a [`DrawSink`] in a fixed order: floor, exhibits, robot
//! body, robot arm.

use cgmath::{Deg, InnerSpace, Matrix4, Rad, Vector3};

use crate::gfx::rendering::{DrawParams, DrawSink, FrameGlobals, SpotlightParams};

use super::context::SimulationContext;
use super::exhibit::ExhibitRecord;
use super::navigator::{NavEvent, RobotState};

pub const FLOOR_COLOR: [f32; 3] = [0.5, 0.5, 0.5];
pub const ROBOT_BODY_COLOR: [f32; 3] = [0.2, 0.2, 0.8];
pub const ROBOT_ARM_COLOR: [f32; 3] = [0.1, 0.5, 0.1];
pub const SPOTLIGHT_COLOR: [f32; 3] = [1.0, 1.0, 0.8];
pub const SPOTLIGHT_INNER: Deg<f32> = Deg(12.5);
pub const SPOTLIGHT_OUTER: Deg<f32> = Deg(17.5);

/// Advances the simulation by `dt` and submits the frame's draws
pub fn run_frame(context: &mut SimulationContext, dt: f32, sink: &mut impl DrawSink) -> Vec<NavEvent> {
    let events = advance(context, dt);
    submit(context, sink);
    events
}

/// Updates the robot if it has somewhere to be
///
/// A fresh scan becomes the exhibit shown in the info popup.
pub fn advance(context: &mut SimulationContext, dt: f32) -> Vec<NavEvent> {
    if !context.navigator.has_objective() {
        return Vec::new();
    }

    let events = context.navigator.update(dt, &mut context.exhibits);
    for event in &events {
        if let NavEvent::Scanned(index) = event {
            context.set_displayed_exhibit(Some(*index));
        }
    }
    events
}

/// Spotlight mounted half a unit above the robot, tilted down along its heading
pub fn spotlight(robot: &RobotState, enabled: bool) -> SpotlightParams {
    let direction = Vector3::new(robot.yaw.sin(), -0.5, robot.yaw.cos()).normalize();
    SpotlightParams {
        position: robot.position + Vector3::new(0.0, 0.5, 0.0),
        direction,
        color: SPOTLIGHT_COLOR.into(),
        inner_cutoff: Rad::from(SPOTLIGHT_INNER).0.cos(),
        outer_cutoff: Rad::from(SPOTLIGHT_OUTER).0.cos(),
        enabled,
    }
}

pub fn floor_transform() -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(0.0, -0.5, 0.0))
        * Matrix4::from_nonuniform_scale(20.0, 0.1, 20.0)
}

pub fn exhibit_transform(exhibit: &ExhibitRecord) -> Matrix4<f32> {
    Matrix4::from_translation(exhibit.position)
        * Matrix4::from_nonuniform_scale(exhibit.scale.x, exhibit.scale.y, exhibit.scale.z)
}

pub fn robot_body_transform(robot: &RobotState) -> Matrix4<f32> {
    Matrix4::from_translation(robot.position)
        * Matrix4::from_angle_y(Rad(robot.yaw))
        * Matrix4::from_nonuniform_scale(0.5, 0.5, 0.8)
}

/// Arm pivots at shoulder height and extends forward from the pivot
pub fn robot_arm_transform(robot: &RobotState) -> Matrix4<f32> {
    Matrix4::from_translation(robot.position + Vector3::new(0.0, 0.3, 0.0))
        * Matrix4::from_angle_y(Rad(robot.yaw))
        * Matrix4::from_angle_x(Rad(robot.arm_angle()))
        * Matrix4::from_translation(Vector3::new(0.0, 0.0, 0.3))
        * Matrix4::from_nonuniform_scale(0.1, 0.1, 0.6)
}

/// Issues one draw per object, in museum order
pub fn submit(context: &SimulationContext, sink: &mut impl DrawSink) {
    let robot = context.navigator.robot();
    let view_position = context.camera.position();

    sink.begin_frame(FrameGlobals {
        view_proj: context.camera.get_view_proj_matrix(),
        view_position,
        spotlight: spotlight(robot, context.lighting.spotlight_on),
    });

    let params = |model: Matrix4<f32>, color: Vector3<f32>| DrawParams {
        model,
        color,
        light_position: context.lighting.main_position,
        view_position,
        light_color: context.lighting.main_color,
    };

    sink.draw(context.room_drawable(), params(floor_transform(), FLOOR_COLOR.into()));

    for exhibit in context.exhibits.iter() {
        sink.draw(exhibit.drawable, params(exhibit_transform(exhibit), exhibit.color));
    }

    sink.draw(
        context.robot_drawable(),
        params(robot_body_transform(robot), ROBOT_BODY_COLOR.into()),
    );
    sink.draw(
        context.robot_drawable(),
        params(robot_arm_transform(robot), ROBOT_ARM_COLOR.into()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MuseumConfig;
    use crate::gfx::rendering::DrawQueue;
    use crate::simulation::context::UiCommand;
    use cgmath::{SquareMatrix, Vector4};

    fn context() -> SimulationContext {
        SimulationContext::museum(&MuseumConfig::default()).0
    }

    fn approx(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    fn apply(m: Matrix4<f32>, x: f32, y: f32, z: f32) -> Vector3<f32> {
        (m * Vector4::new(x, y, z, 1.0)).truncate()
    }

    #[test]
    fn test_draw_order_and_count() {
        let context = context();
        let mut queue = DrawQueue::new();
        submit(&context, &mut queue);

        let calls = queue.calls();
        assert_eq!(calls.len(), context.exhibits.len() + 3);
        assert_eq!(calls[0].drawable, context.room_drawable());
        assert_eq!(calls[0].params.color, Vector3::from(FLOOR_COLOR));

        for (call, exhibit) in calls[1..].iter().zip(context.exhibits.iter()) {
            assert_eq!(call.drawable, exhibit.drawable);
            assert_eq!(call.params.color, exhibit.color);
        }

        let body = &calls[calls.len() - 2];
        let arm = &calls[calls.len() - 1];
        assert_eq!(body.params.color, Vector3::from(ROBOT_BODY_COLOR));
        assert_eq!(arm.params.color, Vector3::from(ROBOT_ARM_COLOR));
        assert_eq!(body.drawable, context.robot_drawable());
    }

    #[test]
    fn test_draws_share_lighting() {
        let mut context = context();
        context.apply(UiCommand::SetMainLightColor(Vector3::new(0.2, 0.4, 0.6)));
        let mut queue = DrawQueue::new();
        submit(&context, &mut queue);

        let camera = context.camera.position();
        for call in queue.calls() {
            assert_eq!(call.params.light_position, Vector3::new(0.0, 10.0, 0.0));
            assert_eq!(call.params.light_color, Vector3::new(0.2, 0.4, 0.6));
            assert_eq!(call.params.view_position, camera);
        }
        assert_eq!(queue.globals().unwrap().view_position, camera);
    }

    #[test]
    fn test_resubmitting_replaces_previous_frame() {
        let context = context();
        let mut queue = DrawQueue::new();
        submit(&context, &mut queue);
        submit(&context, &mut queue);
        assert_eq!(queue.len(), context.exhibits.len() + 3);
    }

    #[test]
    fn test_floor_and_exhibit_transforms() {
        let floor = floor_transform();
        assert!(approx(apply(floor, 0.5, 0.5, 0.5), Vector3::new(10.0, -0.45, 10.0)));

        let context = context();
        let vase = context.exhibits.get(1).unwrap();
        let model = exhibit_transform(vase);
        assert!(approx(apply(model, 0.0, 0.0, 0.0), vase.position));
        assert!(approx(
            apply(model, 0.5, 0.5, 0.5),
            Vector3::new(4.25, 1.0, -3.75)
        ));
    }

    #[test]
    fn test_robot_transforms_follow_pose() {
        let mut context = context();
        context.apply(UiCommand::SetArmAngle(0.0));
        let robot = *context.navigator.robot();

        // home heading is 180°, so local +z points at world -z
        let body = robot_body_transform(&robot);
        assert!(approx(
            apply(body, 0.0, 0.0, 0.5),
            robot.position + Vector3::new(0.0, 0.0, -0.4)
        ));

        // arm tip: pivot + 0.3 + half of 0.6 along the heading
        let arm = robot_arm_transform(&robot);
        assert!(approx(
            apply(arm, 0.0, 0.0, 0.5),
            robot.position + Vector3::new(0.0, 0.3, -0.6)
        ));

        // raising the arm by 90° about local x points it straight down
        context.apply(UiCommand::SetArmAngle(std::f32::consts::FRAC_PI_2));
        let raised = robot_arm_transform(context.navigator.robot());
        assert!(approx(
            apply(raised, 0.0, 0.0, 0.5),
            robot.position + Vector3::new(0.0, 0.3 - 0.6, 0.0)
        ));
    }

    #[test]
    fn test_spotlight_tracks_robot() {
        let context = context();
        let robot = context.navigator.robot();
        let spot = spotlight(robot, true);

        assert!(approx(spot.position, robot.position + Vector3::new(0.0, 0.5, 0.0)));
        assert!((spot.direction.magnitude() - 1.0).abs() < 1e-6);
        let expected = Vector3::new(robot.yaw.sin(), -0.5, robot.yaw.cos()).normalize();
        assert!(approx(spot.direction, expected));
        assert!(spot.inner_cutoff > spot.outer_cutoff);
        assert_eq!(spot.color, Vector3::from(SPOTLIGHT_COLOR));
        assert!(spot.enabled);

        let mut queue = DrawQueue::new();
        submit(&context, &mut queue);
        assert!(!queue.globals().unwrap().spotlight.enabled);
    }

    #[test]
    fn test_scan_opens_popup() {
        let mut context = context();
        let mut queue = DrawQueue::new();
        context.apply(UiCommand::SelectExhibit(0));

        let mut scanned = Vec::new();
        for _ in 0..10_000 {
            scanned.extend(run_frame(&mut context, 1.0 / 60.0, &mut queue));
            if !context.navigator.has_objective() {
                break;
            }
        }

        assert_eq!(scanned, vec![NavEvent::Scanned(0)]);
        let (index, exhibit) = context.displayed_exhibit().unwrap();
        assert_eq!(index, 0);
        assert_eq!(exhibit.name, "Statue of Hercules");
        assert_eq!(queue.len(), context.exhibits.len() + 3);
    }

    #[test]
    fn test_idle_frame_changes_nothing() {
        let mut context = context();
        let before = *context.navigator.robot();
        let mut queue = DrawQueue::new();

        assert!(run_frame(&mut context, 0.5, &mut queue).is_empty());
        assert_eq!(*context.navigator.robot(), before);
        assert!(queue.globals().unwrap().view_proj != Matrix4::identity());
    }
}
