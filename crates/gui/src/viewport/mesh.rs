use glam::Vec3;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

/// Axis-aligned box centered at the origin. Lumber pieces are boxes sized
/// from their catalog profile (already converted to meters).
pub fn timber_box(w: f32, h: f32, l: f32, color: [f32; 3]) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hl = l * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hl), Vec3::new(hw, -hh, hl), Vec3::new(hw, hh, hl), Vec3::new(-hw, hh, hl)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hl), Vec3::new(-hw, -hh, -hl), Vec3::new(-hw, hh, -hl), Vec3::new(hw, hh, -hl)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hl), Vec3::new(hw, -hh, -hl), Vec3::new(hw, hh, -hl), Vec3::new(hw, hh, hl)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hl), Vec3::new(-hw, -hh, hl), Vec3::new(-hw, hh, hl), Vec3::new(-hw, hh, -hl)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hl), Vec3::new(hw, hh, hl), Vec3::new(hw, hh, -hl), Vec3::new(-hw, hh, -hl)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hl), Vec3::new(hw, -hh, -hl), Vec3::new(hw, -hh, hl), Vec3::new(-hw, -hh, hl)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * 9);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / 9) as u32;
        for v in quad {
            vertices.extend_from_slice(&[v.x, v.y, v.z, normal.x, normal.y, normal.z, color[0], color[1], color[2]]);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Ground grid lines on the XZ plane
pub fn grid(range: i32, size: f32, opacity: f32) -> LineMeshData {
    let mut vertices = Vec::new();
    let color = [0.35_f32, 0.36, 0.40, opacity];
    let extent = range as f32 * size;

    for i in -range..=range {
        let offset = i as f32 * size;
        // Lines parallel to X
        push_line_vert(&mut vertices, -extent, 0.0, offset, color);
        push_line_vert(&mut vertices, extent, 0.0, offset, color);
        // Lines parallel to Z
        push_line_vert(&mut vertices, offset, 0.0, -extent, color);
        push_line_vert(&mut vertices, offset, 0.0, extent, color);
    }

    LineMeshData { vertices }
}

/// Origin axes: X red, Y green, Z blue
pub fn axes(length: f32) -> LineMeshData {
    let mut vertices = Vec::new();

    let red = [0.9_f32, 0.2, 0.2, 1.0];
    let green = [0.2_f32, 0.8, 0.2, 1.0];
    let blue = [0.2_f32, 0.3, 0.9, 1.0];

    push_line_vert(&mut vertices, 0.0, 0.0, 0.0, red);
    push_line_vert(&mut vertices, length, 0.0, 0.0, red);
    push_line_vert(&mut vertices, 0.0, 0.0, 0.0, green);
    push_line_vert(&mut vertices, 0.0, length, 0.0, green);
    push_line_vert(&mut vertices, 0.0, 0.0, 0.0, blue);
    push_line_vert(&mut vertices, 0.0, 0.0, length, blue);

    LineMeshData { vertices }
}

pub(crate) fn push_line_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, c: [f32; 4]) {
    v.extend_from_slice(&[px, py, pz, c[0], c[1], c[2], c[3]]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timber_box_counts() {
        let mesh = timber_box(1.0, 2.0, 3.0, [0.5, 0.5, 0.5]);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_timber_box_extents() {
        let mesh = timber_box(2.0, 4.0, 6.0, [1.0, 1.0, 1.0]);
        let mut max = [f32::MIN; 3];
        for v in 0..mesh.vertex_count() {
            for axis in 0..3 {
                max[axis] = max[axis].max(mesh.vertices[v * 9 + axis]);
            }
        }
        assert_eq!(max, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_grid_vertex_count() {
        let lines = grid(2, 1.0, 0.5);
        // (2*range+1) lines in each direction, 2 verts each
        assert_eq!(lines.vertices.len() / 7, (2 * 2 + 1) * 4);
    }
}
