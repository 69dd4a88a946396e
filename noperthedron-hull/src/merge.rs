//! Merge coplanar hull triangles into convex polygons
//!
//! Triangles are grouped by a flood fill across shared edges, starting from the
//! lowest-numbered unassigned triangle. A neighbour joins the group only if all
//! of its corners lie within tolerance of the seed triangle's plane, so long
//! chains of nearly-flat triangles cannot drift into one curved "face".
//! Boundary vertices lying on the line between their loop neighbours are not
//! corners and are dropped from the loop.

use crate::geometry::distance_to_line;
use crate::types::{Face, Point3};
use crate::{ConvexHullError, Result};
use std::collections::HashMap;

/// Merge triangles sharing a plane; returns one boundary loop per group
///
/// Loops keep the winding of the input triangles and start at their smallest
/// vertex index. Groups are emitted in order of their seed triangle.
pub(crate) fn merge_coplanar_faces(
    faces: &[Face],
    vertices: &[Point3],
    tolerance: f64,
) -> Result<Vec<Vec<usize>>> {
    let mut edge_owner: HashMap<(usize, usize), usize> = HashMap::with_capacity(faces.len() * 3);
    for (idx, face) in faces.iter().enumerate() {
        for edge in face.edges() {
            if edge_owner.insert(edge, idx).is_some() {
                return Err(ConvexHullError::TopologyValidation(format!(
                    "directed edge ({}, {}) belongs to more than one triangle",
                    edge.0, edge.1
                )));
            }
        }
    }

    let mut group_of = vec![usize::MAX; faces.len()];
    let mut polygons = Vec::new();
    let mut stack = Vec::new();

    for seed in 0..faces.len() {
        if group_of[seed] != usize::MAX {
            continue;
        }
        let group = polygons.len();
        let normal = faces[seed].normal(vertices);
        let offset = normal.dot(&vertices[faces[seed].v0]);

        group_of[seed] = group;
        stack.push(seed);
        let mut members = Vec::new();

        while let Some(t) = stack.pop() {
            members.push(t);
            for (a, b) in faces[t].edges() {
                let Some(&n) = edge_owner.get(&(b, a)) else {
                    continue;
                };
                if group_of[n] != usize::MAX {
                    continue;
                }
                let on_plane = faces[n]
                    .indices()
                    .iter()
                    .all(|&v| (normal.dot(&vertices[v]) - offset).abs() <= tolerance);
                if on_plane && faces[n].normal(vertices).dot(&normal) > 0.0 {
                    group_of[n] = group;
                    stack.push(n);
                }
            }
        }

        let mut polygon = boundary_loop(&members, faces, &group_of, &edge_owner)?;
        if members.len() > 1 {
            drop_collinear_corners(&mut polygon, vertices, tolerance);
        }
        polygons.push(polygon);
    }

    Ok(polygons)
}

/// Chain the boundary edges of a triangle group into a single loop
fn boundary_loop(
    members: &[usize],
    faces: &[Face],
    group_of: &[usize],
    edge_owner: &HashMap<(usize, usize), usize>,
) -> Result<Vec<usize>> {
    let group = group_of[members[0]];
    let mut next: HashMap<usize, usize> = HashMap::new();

    for &t in members {
        for (a, b) in faces[t].edges() {
            let interior = edge_owner
                .get(&(b, a))
                .is_some_and(|&n| group_of[n] == group);
            if interior {
                continue;
            }
            if next.insert(a, b).is_some() {
                return Err(ConvexHullError::TopologyValidation(format!(
                    "merged face boundary passes through vertex {} twice",
                    a
                )));
            }
        }
    }

    let Some(&start) = next.keys().min() else {
        return Err(ConvexHullError::TopologyValidation(
            "merged face has no boundary".to_string(),
        ));
    };

    let mut polygon = Vec::with_capacity(next.len());
    let mut current = start;
    loop {
        polygon.push(current);
        match next.get(&current) {
            Some(&v) if v == start => break,
            Some(&v) if polygon.len() < next.len() => current = v,
            _ => {
                return Err(ConvexHullError::TopologyValidation(format!(
                    "merged face boundary starting at vertex {} is not a single closed loop",
                    start
                )));
            }
        }
    }

    if polygon.len() != next.len() {
        return Err(ConvexHullError::TopologyValidation(format!(
            "merged face boundary has {} edges but its loop visits {} vertices",
            next.len(),
            polygon.len()
        )));
    }

    Ok(polygon)
}

/// Remove vertices within `tolerance` of the line through their neighbours
///
/// The neighbour pair is measured in index order so both faces sharing an
/// edge make the same decision. The loop is rotated back to start at its
/// smallest vertex index.
fn drop_collinear_corners(polygon: &mut Vec<usize>, vertices: &[Point3], tolerance: f64) {
    let mut i = 0;
    let mut checked = 0;
    while polygon.len() > 3 && checked < polygon.len() {
        let n = polygon.len();
        let prev = polygon[(i + n - 1) % n];
        let next = polygon[(i + 1) % n];
        let (a, b) = (prev.min(next), prev.max(next));
        if distance_to_line(&vertices[polygon[i]], &vertices[a], &vertices[b]) <= tolerance {
            polygon.remove(i);
            checked = 0;
            if i >= polygon.len() {
                i = 0;
            }
        } else {
            checked += 1;
            i = (i + 1) % n;
        }
    }

    if let Some(start) = polygon
        .iter()
        .enumerate()
        .min_by_key(|&(_, &v)| v)
        .map(|(pos, _)| pos)
    {
        polygon.rotate_left(start);
    }
}
