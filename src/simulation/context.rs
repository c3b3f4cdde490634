//! Museum simulation state
//!
//! Everything the frame loop mutates lives in one [`SimulationContext`]:
//! camera, robot, exhibits, lighting and the exhibit shown in the info popup.
//! The UI never mutates it directly; it returns [`UiCommand`]s that are
//! applied right after the UI is built, within the same frame.

use cgmath::Vector3;

use crate::config::{LightingConfig, MuseumConfig};
use crate::gfx::{
    camera::{CameraController, CameraManager, FlyCamera},
    geometry::unit_cube,
    scene::{DrawableId, MeshCatalog},
};

use super::exhibit::{ExhibitRecord, ExhibitRegistry};
use super::navigator::Navigator;

/// Main light and spotlight switch, editable from the UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub main_position: Vector3<f32>,
    pub main_color: Vector3<f32>,
    pub spotlight_on: bool,
}

impl From<LightingConfig> for Lighting {
    fn from(config: LightingConfig) -> Self {
        Self {
            main_position: config.main_position,
            main_color: config.main_color,
            spotlight_on: config.spotlight_on,
        }
    }
}

/// State changes requested by the UI overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiCommand {
    StartTour,
    /// Abandon the current objective and return home
    Stop,
    SelectExhibit(usize),
    ClosePopup,
    /// Arm angle in radians
    SetArmAngle(f32),
    SetMainLightColor(Vector3<f32>),
    SetMainLightPosition(Vector3<f32>),
    SetSpotlight(bool),
}

pub struct SimulationContext {
    pub camera: CameraManager,
    pub navigator: Navigator,
    pub exhibits: ExhibitRegistry,
    pub lighting: Lighting,
    displayed_exhibit: Option<usize>,
    room: DrawableId,
    robot: DrawableId,
}

impl SimulationContext {
    /// Builds the standard museum and the meshes it will draw with
    ///
    /// The returned catalog must be uploaded into a
    /// [`DrawableRegistry`](crate::gfx::scene::DrawableRegistry) for the
    /// context's handles to resolve.
    pub fn museum(config: &MuseumConfig) -> (Self, MeshCatalog) {
        let mut catalog = MeshCatalog::new();
        let cube = catalog.register("cube", unit_cube());
        let room = catalog.register("room", unit_cube());

        let camera = CameraManager::new(
            FlyCamera::new(&config.camera, config.aspect()),
            CameraController::new(true),
        );

        let context = Self {
            camera,
            navigator: Navigator::new(&config.robot),
            exhibits: ExhibitRegistry::museum(cube),
            lighting: config.lighting.into(),
            displayed_exhibit: None,
            room,
            robot: cube,
        };
        log::debug!(
            "Museum assembled with {} exhibits and {} meshes",
            context.exhibits.len(),
            catalog.len()
        );
        (context, catalog)
    }

    pub fn room_drawable(&self) -> DrawableId {
        self.room
    }

    pub fn robot_drawable(&self) -> DrawableId {
        self.robot
    }

    /// Exhibit shown in the info popup, once it has been scanned
    pub fn displayed_exhibit(&self) -> Option<(usize, &ExhibitRecord)> {
        let index = self.displayed_exhibit?;
        self.exhibits
            .get(index)
            .filter(|exhibit| exhibit.scanned)
            .map(|exhibit| (index, exhibit))
    }

    pub(crate) fn set_displayed_exhibit(&mut self, index: Option<usize>) {
        self.displayed_exhibit = index;
    }

    /// Applies one UI command immediately
    pub fn apply(&mut self, command: UiCommand) {
        match command {
            UiCommand::StartTour => {
                self.navigator.start_tour(&mut self.exhibits);
                self.displayed_exhibit = None;
            }
            UiCommand::Stop => self.navigator.stop(),
            UiCommand::SelectExhibit(index) => {
                if self.navigator.select(index, &mut self.exhibits) {
                    self.displayed_exhibit = None;
                }
            }
            UiCommand::ClosePopup => self.displayed_exhibit = None,
            UiCommand::SetArmAngle(radians) => self.navigator.set_arm_angle(radians),
            UiCommand::SetMainLightColor(color) => self.lighting.main_color = color,
            UiCommand::SetMainLightPosition(position) => self.lighting.main_position = position,
            UiCommand::SetSpotlight(on) => self.lighting.spotlight_on = on,
        }
    }

    /// Keeps the camera aspect in step with the window
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.camera.resize_projection(width, height);
    }
}
