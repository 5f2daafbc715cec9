use crate::schema::tile::identity::TileId;

use std::vec::Vec;


/// Ancestor of `id` at the coarser zoom `target_zoom`. Calling with a
/// zoom at or below the tile's own is a caller bug.
pub fn parent(id: &TileId, target_zoom: u32) -> TileId {
    assert!(target_zoom < id.z, "Parent zoom {} is not above tile {}", target_zoom, id);
    let mut ancestor = *id;
    while ancestor.z > target_zoom {
        ancestor.x = ancestor.x / 2;
        ancestor.y = ancestor.y / 2;
        ancestor.z -= 1;
    }
    return ancestor;
}

/// All descendants of `id` at the finer zoom `target_zoom`, one per
/// coordinate in the covered square. Calling with a zoom at or below
/// the tile's own is a caller bug.
pub fn children(id: &TileId, target_zoom: u32) -> Vec<TileId> {
    assert!(target_zoom > id.z, "Child zoom {} is not below tile {}", target_zoom, id);
    let factor = 1u32 << (target_zoom - id.z);
    let mut result = Vec::with_capacity((factor as usize) * (factor as usize));
    for y in (id.y * factor)..((id.y + 1) * factor) {
        for x in (id.x * factor)..((id.x + 1) * factor) {
            result.push(
                TileId {
                    x,
                    y,
                    z: target_zoom,
                }
            );
        }
    }
    return result;
}
