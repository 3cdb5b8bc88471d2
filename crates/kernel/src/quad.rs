use bytemuck::{Pod, Zeroable};

/// Half the side length of the box in clip-space units.
pub const QUAD_HALF_EXTENT: f32 = 0.1;

/// Vertices per draw call.
pub const QUAD_VERTEX_COUNT: u32 = 4;

/// A single quad corner. Position only; the box has no normals or UVs.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
}

/// Build the four corners of an axis-aligned square centred on the origin.
///
/// Corners are emitted in triangle-strip order (bottom-left, bottom-right,
/// top-left, top-right) so four vertices cover the whole square.
pub fn quad_vertices(half_extent: f32) -> [QuadVertex; 4] {
    let h = half_extent;
    #[rustfmt::skip]
    let vertices = [
        QuadVertex { position: [-h, -h, 0.0] },
        QuadVertex { position: [ h, -h, 0.0] },
        QuadVertex { position: [-h,  h, 0.0] },
        QuadVertex { position: [ h,  h, 0.0] },
    ];
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_has_four_corners() {
        let v = quad_vertices(QUAD_HALF_EXTENT);
        assert_eq!(v.len() as u32, QUAD_VERTEX_COUNT);
    }

    #[test]
    fn quad_is_centred_and_flat() {
        let v = quad_vertices(QUAD_HALF_EXTENT);
        let (sx, sy) = v
            .iter()
            .fold((0.0, 0.0), |(x, y), c| (x + c.position[0], y + c.position[1]));
        assert!(sx.abs() < 1e-6);
        assert!(sy.abs() < 1e-6);
        assert!(v.iter().all(|c| c.position[2] == 0.0));
    }

    #[test]
    fn strip_order_covers_square() {
        // Triangles (0,1,2) and (1,2,3) must share the diagonal 1-2.
        let v = quad_vertices(1.0);
        assert_eq!(v[1].position, [1.0, -1.0, 0.0]);
        assert_eq!(v[2].position, [-1.0, 1.0, 0.0]);
        assert_ne!(v[0].position, v[3].position);
    }

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 12);
        let v = quad_vertices(QUAD_HALF_EXTENT);
        assert_eq!(bytemuck::cast_slice::<_, u8>(&v).len(), 48);
    }
}
