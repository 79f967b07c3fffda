//! Deferred entity removal.

use hecs::{Entity, World};

/// Despawn everything collected in the buffer and leave it empty for reuse.
/// Entities already gone are skipped.
pub fn flush(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
