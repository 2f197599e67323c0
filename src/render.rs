//! Rendering seam
//!
//! The core never touches a graphics API. A host supplies an `AssetProvider`
//! to turn texture names into handles and a `SpriteRenderer` to draw them.

use glam::{Vec2, Vec3, Vec4};

use crate::consts::PARTICLE_SIZE;
use crate::sim::{Entity, GamePhase, GameState, Level, ParticlePool, Sprite};

/// Opaque handle from the asset provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Opaque shader handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

pub trait AssetProvider {
    fn texture(&self, name: &str) -> TextureHandle;
    fn shader(&self, name: &str) -> ShaderHandle;
}

pub trait SpriteRenderer {
    /// Bind the shader for the draws that follow
    fn use_shader(&mut self, shader: ShaderHandle);
    fn draw(&mut self, texture: TextureHandle, pos: Vec2, size: Vec2, rotation: f32, color: Vec3);
    /// Additive, alpha-faded quad
    fn draw_particle(&mut self, texture: TextureHandle, pos: Vec2, scale: f32, color: Vec4);
    fn draw_text(&mut self, text: &str, pos: Vec2, scale: f32, color: Vec3);
}

fn draw_entity(entity: &Entity, assets: &dyn AssetProvider, renderer: &mut dyn SpriteRenderer) {
    let texture = assets.texture(entity.sprite.texture_name());
    renderer.draw(texture, entity.pos, entity.size, entity.rotation, entity.color);
}

/// Draw the bricks still in play
pub fn draw_level(level: &Level, assets: &dyn AssetProvider, renderer: &mut dyn SpriteRenderer) {
    for brick in level.live_bricks() {
        draw_entity(brick, assets, renderer);
    }
}

/// Draw the live trail particles with the particle shader, then rebind the
/// sprite shader
pub fn draw_particles(particles: &ParticlePool, assets: &dyn AssetProvider, renderer: &mut dyn SpriteRenderer) {
    renderer.use_shader(assets.shader("particle"));
    let texture = assets.texture("particle");
    for particle in particles.live() {
        renderer.draw_particle(texture, particle.pos, PARTICLE_SIZE, particle.color.extend(particle.alpha));
    }
    renderer.use_shader(assets.shader("sprite"));
}

/// Draw one frame of the game
pub fn render_frame(state: &GameState, assets: &dyn AssetProvider, renderer: &mut dyn SpriteRenderer) {
    let white = Vec3::ONE;
    renderer.use_shader(assets.shader("sprite"));

    if matches!(state.phase, GamePhase::Active | GamePhase::Menu) {
        renderer.draw(
            assets.texture(Sprite::Background.texture_name()),
            Vec2::ZERO,
            Vec2::new(state.field_width, state.field_height),
            0.0,
            white,
        );
        draw_level(state.current_level(), assets, renderer);
        draw_entity(&state.paddle, assets, renderer);
        for power_up in state.power_ups.iter().filter(|p| !p.body.destroyed) {
            draw_entity(&power_up.body, assets, renderer);
        }
        draw_particles(&state.particles, assets, renderer);
        draw_entity(&state.ball.body, assets, renderer);

        renderer.draw_text(&format!("Lives:{}", state.lives), Vec2::new(5.0, 5.0), 1.0, white);
    }

    let mid = state.field_height / 2.0;
    match state.phase {
        GamePhase::Menu => {
            renderer.draw_text("Press ENTER to start", Vec2::new(250.0, mid), 1.0, white);
            renderer.draw_text(
                "Press W or S to select level",
                Vec2::new(245.0, mid + 20.0),
                0.75,
                white,
            );
        }
        GamePhase::Win => {
            renderer.draw_text("You WON!!!", Vec2::new(320.0, mid - 20.0), 1.0, Vec3::new(0.0, 1.0, 0.0));
            renderer.draw_text(
                "Press ENTER to retry or ESC to quit",
                Vec2::new(130.0, mid),
                1.0,
                Vec3::new(1.0, 1.0, 0.0),
            );
        }
        GamePhase::Active => {}
    }
}
