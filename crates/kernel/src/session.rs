use carquest_camera::{CameraError, CameraFrame, CameraMode, ChaseCamera};
use carquest_input::{Control, InputState};
use carquest_terrain::{
    Heightfield, HeightSampler, RampPlacement, TerrainError, TerrainGenerator, scatter_ramps,
};
use carquest_vehicle::{
    DriveControls, GroundTransition, VehicleController, VehicleError, VehiclePose,
};

use crate::config::{ConfigError, SessionConfig};

/// Errors from starting a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("terrain: {0}")]
    Terrain(#[from] TerrainError),
    #[error("vehicle: {0}")]
    Vehicle(#[from] VehicleError),
    #[error("camera: {0}")]
    Camera(#[from] CameraError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("display scale must be finite and positive, got {0}")]
    InvalidDisplayScale(f32),
}

/// Notable things that happened during a session, in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    Started { seed: u64 },
    CameraModeChanged { tick: u64, mode: CameraMode },
    Landed { tick: u64 },
    LeftGround { tick: u64 },
    Detached { tick: u64 },
}

/// Read-only result of one step, handed to the renderer adapter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub pose: VehiclePose,
    pub grounded: bool,
    pub braking: bool,
    pub slope_limited: bool,
    pub camera_mode: CameraMode,
    /// In orbit mode this is the orbit home and target; the external orbit
    /// control takes over from there.
    pub camera: CameraFrame,
}

/// Optional physics collaborator that wants a static copy of the terrain.
/// The session never reads anything back from it.
pub trait PhysicsWorld {
    fn add_static_heightfield(&mut self, field: &Heightfield, element_size: f32, display_scale: f32);
}

/// One driving session: terrain generated once, plus the car, camera and
/// input state that evolve every frame.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    sampler: HeightSampler,
    ramps: Vec<RampPlacement>,
    vehicle: VehicleController,
    camera: ChaseCamera,
    camera_mode: CameraMode,
    input: InputState,
    tick: u64,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Generate terrain and place the car. Fails fast on invalid config.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        if !config.display_scale.is_finite() || config.display_scale <= 0.0 {
            return Err(SessionError::InvalidDisplayScale(config.display_scale));
        }
        let noise = config.noise.build(config.seed);
        let field = TerrainGenerator::new(config.terrain.clone()).generate(
            config.resolution,
            config.size,
            noise.as_ref(),
        )?;
        let sampler = HeightSampler::new(field)
            .with_display_scale(config.display_scale)
            .with_mode(config.sample_mode);
        let ramps = scatter_ramps(config.seed, config.size, config.ramps);
        let vehicle = VehicleController::new(config.vehicle.clone())?;
        let camera = ChaseCamera::new(config.camera.clone())?;

        tracing::info!(
            seed = config.seed,
            resolution = config.resolution,
            size = config.size,
            ramps = ramps.len(),
            "session started"
        );

        Ok(Self {
            events: vec![SessionEvent::Started { seed: config.seed }],
            config,
            sampler,
            ramps,
            vehicle,
            camera,
            camera_mode: CameraMode::Follow,
            input: InputState::new(),
            tick: 0,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn pose(&self) -> &VehiclePose {
        self.vehicle.pose()
    }

    pub fn vehicle(&self) -> &VehicleController {
        &self.vehicle
    }

    pub fn camera(&self) -> &ChaseCamera {
        &self.camera
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera_mode
    }

    pub fn sampler(&self) -> &HeightSampler {
        &self.sampler
    }

    pub fn heightfield(&self) -> &Heightfield {
        self.sampler.heightfield()
    }

    pub fn ramps(&self) -> &[RampPlacement] {
        &self.ramps
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand the terrain to a physics collaborator.
    pub fn export_collision<P: PhysicsWorld + ?Sized>(&self, physics: &mut P) {
        let field = self.heightfield();
        physics.add_static_heightfield(field, field.element_size(), self.sampler.display_scale());
    }

    /// Start delivering host events. Dropping the guard detaches them.
    pub fn attach(&mut self) -> AttachedSession<'_> {
        tracing::info!(tick = self.tick, "input listeners attached");
        AttachedSession { session: self }
    }

    /// Advance one frame: read input, move the car, move the camera.
    pub fn step(&mut self) -> Frame {
        let _span = tracing::trace_span!("session_step", tick = self.tick + 1).entered();
        let input = self.input.begin_tick();
        self.tick += 1;

        if input.camera_toggles % 2 == 1 {
            self.camera_mode = self.camera_mode.toggled();
            tracing::info!(mode = ?self.camera_mode, "camera mode changed");
            self.events.push(SessionEvent::CameraModeChanged {
                tick: self.tick,
                mode: self.camera_mode,
            });
        }
        for &delta in &input.wheel_deltas {
            self.camera.zoom(delta);
        }

        let controls = DriveControls {
            forward: input.forward,
            backward: input.backward,
            turn_left: input.turn_left,
            turn_right: input.turn_right,
            brake: input.brake,
        };
        let report = self.vehicle.tick(&controls, &self.sampler);
        match report.transition {
            Some(GroundTransition::Landed) => {
                self.events.push(SessionEvent::Landed { tick: self.tick })
            }
            Some(GroundTransition::LeftGround) => {
                self.events.push(SessionEvent::LeftGround { tick: self.tick })
            }
            None => {}
        }

        let pose = *self.vehicle.pose();
        let camera = match self.camera_mode {
            CameraMode::Follow => self.camera.update(&pose),
            CameraMode::Orbit => CameraFrame {
                position: self.config.camera.orbit_home,
                look_at: self.config.camera.orbit_target,
            },
        };

        Frame {
            tick: self.tick,
            pose,
            grounded: report.grounded,
            braking: report.braking,
            slope_limited: report.slope_limited,
            camera_mode: self.camera_mode,
            camera,
        }
    }

    /// Hash of everything that evolves per tick, for determinism checks.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mut mix = |bytes: &[u8]| {
            for &b in bytes {
                h ^= b as u64;
                h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let pose = self.vehicle.pose();
        mix(&self.tick.to_le_bytes());
        mix(&[self.camera_mode as u8, self.vehicle.is_braking() as u8]);
        for v in [
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.heading,
            pose.velocity.x,
            pose.velocity.y,
            pose.velocity.z,
            self.camera.position().x,
            self.camera.position().y,
            self.camera.position().z,
            self.camera.back_distance(),
        ] {
            mix(&v.to_le_bytes());
        }
        h
    }
}

/// Scoped connection between host event listeners and a session.
///
/// Holding the guard is what "listeners attached" means: key and wheel events
/// flow into the session's input state and `frame` runs the loop body. Drop
/// releases every held control so nothing stays stuck on teardown.
pub struct AttachedSession<'a> {
    session: &'a mut Session,
}

impl AttachedSession<'_> {
    /// Key event by host key name; resolved through the session bindings.
    pub fn key(&mut self, key: &str, pressed: bool) {
        let s = &mut *self.session;
        s.input.key(&s.config.bindings, key, pressed);
    }

    pub fn control(&mut self, control: Control, pressed: bool) {
        self.session.input.set(control, pressed);
    }

    pub fn wheel(&mut self, delta: f32) {
        self.session.input.wheel(delta);
    }

    /// One display-refresh callback.
    pub fn frame(&mut self) -> Frame {
        self.session.step()
    }

    pub fn session(&self) -> &Session {
        self.session
    }
}

impl Drop for AttachedSession<'_> {
    fn drop(&mut self) {
        let s = &mut *self.session;
        s.input.clear();
        s.events.push(SessionEvent::Detached { tick: s.tick });
        tracing::info!(tick = s.tick, "input listeners detached");
    }
}
