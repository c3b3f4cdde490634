// src/ui/panel.rs
//! Museum UI panels
//!
//! Panels only read the [`SimulationContext`]. Every change a user makes is
//! returned as a [`UiCommand`] for the caller to apply after the frame's UI
//! has been built.

use imgui::{Condition, Drag, TreeNodeFlags, Ui};

use crate::simulation::{NavState, SimulationContext, TravelMode, UiCommand};

/// Builds every museum panel for this frame
pub fn museum_ui(ui: &Ui, context: &SimulationContext) -> Vec<UiCommand> {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return Vec::new();
    }

    let mut commands = Vec::new();
    controls_panel(ui, context, &mut commands);
    object_information(ui, context, &mut commands);
    commands
}

/// "Virtual Museum Controls" window
pub fn controls_panel(ui: &Ui, context: &SimulationContext, commands: &mut Vec<UiCommand>) {
    ui.window("Virtual Museum Controls")
        .size([360.0, 560.0], Condition::FirstUseEver)
        .position([20.0, 20.0], Condition::FirstUseEver)
        .build(|| {
            lighting_section(ui, context, commands);
            robot_section(ui, context, commands);
            camera_section(ui, context);
        });
}

fn lighting_section(ui: &Ui, context: &SimulationContext, commands: &mut Vec<UiCommand>) {
    if !ui.collapsing_header("Lighting", TreeNodeFlags::DEFAULT_OPEN) {
        return;
    }

    let mut color: [f32; 3] = context.lighting.main_color.into();
    if ui.color_edit3("Light Color", &mut color) {
        commands.push(UiCommand::SetMainLightColor(color.into()));
    }

    let mut position: [f32; 3] = context.lighting.main_position.into();
    if Drag::new("Light Position")
        .speed(0.1)
        .build_array(ui, &mut position[..])
    {
        commands.push(UiCommand::SetMainLightPosition(position.into()));
    }

    let mut spotlight_on = context.lighting.spotlight_on;
    if ui.checkbox("Robot Spotlight", &mut spotlight_on) {
        commands.push(UiCommand::SetSpotlight(spotlight_on));
    }
}

fn robot_section(ui: &Ui, context: &SimulationContext, commands: &mut Vec<UiCommand>) {
    if !ui.collapsing_header("Robot Control", TreeNodeFlags::DEFAULT_OPEN) {
        return;
    }

    ui.text(format!("Status: {}", status_line(context)));

    if ui.button("Start Automatic Tour") {
        commands.push(UiCommand::StartTour);
    }
    ui.same_line();
    if ui.button("Stop Robot / Return Home") {
        commands.push(UiCommand::Stop);
    }

    ui.separator();
    ui.text("Send robot to:");
    for (index, exhibit) in context.exhibits.iter().enumerate() {
        let marker = if exhibit.scanned { " (scanned)" } else { "" };
        if ui.button(format!("{}{}##exhibit{}", exhibit.name, marker, index)) {
            commands.push(UiCommand::SelectExhibit(index));
        }
    }

    ui.separator();
    let robot = context.navigator.robot();
    ui.text(format!(
        "Robot Position: ({:.2}, {:.2}, {:.2})",
        robot.position.x, robot.position.y, robot.position.z
    ));

    let mut arm_degrees = robot.arm_angle().to_degrees();
    if ui.slider("Arm Angle (debug)", 0.0, 90.0, &mut arm_degrees) {
        commands.push(UiCommand::SetArmAngle(arm_degrees.to_radians()));
    }
}

fn camera_section(ui: &Ui, context: &SimulationContext) {
    if !ui.collapsing_header("Camera Control", TreeNodeFlags::empty()) {
        return;
    }

    let captured = context.camera.controller.is_captured();
    ui.text(format!(
        "Mouse: {}",
        if captured { "captured" } else { "free" }
    ));
    let position = context.camera.position();
    ui.text(format!(
        "Camera: ({:.1}, {:.1}, {:.1})",
        position.x, position.y, position.z
    ));
    ui.text_wrapped("M toggles mouse capture. WASD moves, E/Q rises and sinks, scroll zooms. Esc quits.");
}

/// Popup describing the exhibit the robot just scanned
pub fn object_information(ui: &Ui, context: &SimulationContext, commands: &mut Vec<UiCommand>) {
    let Some((_, exhibit)) = context.displayed_exhibit() else {
        return;
    };

    let display_size = ui.io().display_size;
    ui.window("Object Information")
        .position(
            [display_size[0] * 0.5, display_size[1] * 0.5],
            Condition::Appearing,
        )
        .position_pivot([0.5, 0.5])
        .always_auto_resize(true)
        .collapsible(false)
        .build(|| {
            ui.text(&exhibit.name);
            ui.separator();
            ui.text_wrapped(&exhibit.description);
            ui.spacing();
            if ui.button("Close") {
                commands.push(UiCommand::ClosePopup);
            }
        });
}

fn status_line(context: &SimulationContext) -> String {
    let name = |index: usize| {
        context
            .exhibits
            .get(index)
            .map_or("unknown exhibit", |exhibit| exhibit.name.as_str())
    };

    match context.navigator.state() {
        NavState::Idle => "Idle".to_string(),
        NavState::ReturningHome => "Returning home".to_string(),
        NavState::Seeking {
            target,
            mode: TravelMode::Tour,
        } => format!(
            "Touring ({}/{}) - {}",
            target + 1,
            context.exhibits.len(),
            name(target)
        ),
        NavState::Seeking {
            target,
            mode: TravelMode::Manual,
        } => format!("Heading to {}", name(target)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MuseumConfig;

    #[test]
    fn test_status_line_follows_navigation() {
        let mut context = SimulationContext::museum(&MuseumConfig::default()).0;
        assert_eq!(status_line(&context), "Idle");

        context.apply(UiCommand::StartTour);
        assert_eq!(status_line(&context), "Touring (1/5) - Statue of Hercules");

        context.apply(UiCommand::SelectExhibit(1));
        assert_eq!(status_line(&context), "Heading to Ancient Vase");

        context.apply(UiCommand::Stop);
        assert_eq!(status_line(&context), "Returning home");
    }
}
