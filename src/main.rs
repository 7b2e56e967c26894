//! Headless demo of the `keel` ECS: a player moved by scripted keyboard input.

use std::error::Error;

use log::LevelFilter;
use semver::Version;
use ultraviolet::Vec3;
use winit::event::VirtualKeyCode;

use keel::config::Config;
use keel::context::{CoreContext, Input, ObjectId, Renderer};
use keel::ecs::{DeltaTime, EntityMut, SystemResult, World};

mod logger;

const APP_NAME: &str = env!("CARGO_CRATE_NAME", "binary must be compiled by Cargo");
const APP_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "binary must be compiled by Cargo");

const FRAMES: usize = 120;
const FRAME_TIME: DeltaTime = 1.0 / 60.0;

#[derive(Debug, Clone, Copy)]
struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zero(),
            rotation: Vec3::zero(),
            scale: Vec3::one(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Motion {
    velocity: Vec3,
    speed: f32,
}

impl Motion {
    fn new(speed: f32) -> Self {
        Self {
            velocity: Vec3::zero(),
            speed,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Mesh {
    object: ObjectId,
}

/// Marks entities driven by the keyboard.
#[derive(Debug, Clone, Copy)]
struct PlayerInput;

type Context = CoreContext;

fn controller(_: DeltaTime, entity: &mut EntityMut<'_>, context: &mut Context) -> SystemResult {
    let input = context.input();
    let motion = entity.get_mut::<Motion>()?;
    if input.key_down(VirtualKeyCode::W) {
        motion.velocity.y -= motion.speed;
    }
    if input.key_down(VirtualKeyCode::S) {
        motion.velocity.y += motion.speed;
    }
    if input.key_down(VirtualKeyCode::A) {
        motion.velocity.x -= motion.speed;
    }
    if input.key_down(VirtualKeyCode::D) {
        motion.velocity.x += motion.speed;
    }
    Ok(())
}

fn movement(dt: DeltaTime, entity: &mut EntityMut<'_>, _: &mut Context) -> SystemResult {
    let motion = entity.get_mut::<Motion>()?;
    let velocity = motion.velocity * dt;
    motion.velocity = Vec3::zero();
    entity.get_mut::<Transform>()?.position += velocity;
    Ok(())
}

fn update_mesh_ubo(_: DeltaTime, entity: &mut EntityMut<'_>, context: &mut Context) -> SystemResult {
    let position = entity.get::<Transform>()?.position;
    let object = entity.get::<Mesh>()?.object;
    let ubo = context
        .renderer_mut()
        .object_mut(object)
        .ok_or("mesh refers to unknown render object")?;
    // absolute position, not accumulated across frames
    ubo.position.x = 0.5 + position.x;
    ubo.position.y = position.y;
    Ok(())
}

fn select_mesh(_: DeltaTime, entity: &mut EntityMut<'_>, context: &mut Context) -> SystemResult {
    if context.input().key_pressed(VirtualKeyCode::Key1) {
        log::info!("mesh of {} selected", entity.handle());
    }
    Ok(())
}

/// Keys held down during the given frame.
fn scripted_keys(frame: usize) -> &'static [VirtualKeyCode] {
    match frame {
        0..=29 => &[VirtualKeyCode::D],
        30..=59 => &[VirtualKeyCode::D, VirtualKeyCode::W],
        60 => &[VirtualKeyCode::Key1],
        61..=89 => &[VirtualKeyCode::A],
        _ => &[],
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let _handle = logger::init(LevelFilter::Debug)?;
    log::info!("logger initialized successfully");

    let version: Version = APP_VERSION_STR.parse()?;
    let enable_validation = cfg!(debug_assertions);
    let config = Config::new(APP_NAME.to_string(), version, enable_validation)
        .with_entity_capacity(1)
        .with_system_capacity(4);

    let mut context = Context::default();
    let object = context.renderer_mut().add_object();

    let mut world =
        World::with_config::<(Transform, Motion, Mesh, PlayerInput)>(config, context)?;
    world.add_system::<(Transform, Motion, PlayerInput), _>(0, controller)?;
    world.add_system::<(Transform, Motion), _>(1, movement)?;
    world.add_system::<(Transform, Mesh), _>(2, update_mesh_ubo)?;
    world.add_system::<(Mesh,), _>(2, select_mesh)?;

    let player = world.add_entity((
        Transform::default(),
        Motion::new(3.0),
        Mesh { object },
        PlayerInput,
    ))?;

    for frame in 0..FRAMES {
        let input = world.context_mut().input_mut();
        for key in scripted_keys(frame) {
            input.set_key(*key, true);
        }

        world.update(FRAME_TIME);

        let input = world.context_mut().input_mut();
        input.end_frame();
        for key in scripted_keys(frame) {
            input.set_key(*key, false);
        }
    }

    let transform = world.get::<Transform>(player)?;
    log::info!(
        "{} finished at {:?} (rotation {:?}, scale {:?})",
        player,
        transform.position,
        transform.rotation,
        transform.scale,
    );
    let ubo = world.context().renderer().object(object);
    log::info!("render object uniform: {:?}", ubo);
    Ok(())
}
