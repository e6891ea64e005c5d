/// Visibility graph — recursive discovery and rendering of portal views.
///
/// Built fresh for every main camera render. Each (portal, depth) node
/// borrows one pool target, renders its own children first, then renders
/// the scene seen through the portal into the target and hands the target
/// to the portal surface. Deeper views are therefore composited by texture
/// lookup when the shallower view is rendered.
///
/// Depth 0 is the main camera. A node is created only while
/// `depth < max_recursion_depth`.

use std::sync::Arc;
use glam::{Mat4, Vec4};
use crate::camera::{oblique_projection, plane_to_view_space, Camera};
use crate::error::{Error, Result};
use crate::pool::RenderTargetPool;
use crate::portal::{PortalKey, PortalLink, PortalRegistry};
use crate::renderer::{RenderTarget, Renderer};

/// Below this camera-to-exit-plane distance the oblique projection
/// degenerates and the base projection is used instead.
pub const NEAR_CLIP_LIMIT: f32 = 0.2;

/// One issued recursive render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecursionNode {
    /// Portal whose surface received the render
    pub portal: PortalKey,
    /// Recursion depth of the viewpoint looking through `portal`
    pub depth: u32,
}

/// Outcome of one graph build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphStats {
    /// Rendered nodes, in render order (deepest first)
    pub nodes: Vec<RecursionNode>,
    /// Nodes skipped because the pool was exhausted
    pub skipped_exhausted: u32,
}

impl GraphStats {
    /// Number of recursive render passes issued
    pub fn passes(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest rendered depth, `None` when nothing was rendered
    pub fn max_depth(&self) -> Option<u32> {
        self.nodes.iter().map(|node| node.depth).max()
    }
}

/// Per-frame visibility graph.
pub struct VisibilityGraph {
    max_recursion_depth: u32,
}

impl VisibilityGraph {
    pub fn new(max_recursion_depth: u32) -> Self {
        Self { max_recursion_depth }
    }

    pub fn max_recursion_depth(&self) -> u32 {
        self.max_recursion_depth
    }

    /// Discover and render every portal view reachable from `main_camera`.
    ///
    /// `aux_camera` provides the base projection and culling mask of every
    /// recursive view and is the camera handed to the renderer for each
    /// pass.
    ///
    /// # Errors
    ///
    /// Backend errors abort the build. Pool exhaustion does not: the node
    /// is skipped and counted in `GraphStats::skipped_exhausted`.
    pub fn render(
        &self,
        main_camera: &Camera,
        aux_camera: &mut Camera,
        pool: &mut RenderTargetPool,
        renderer: &mut dyn Renderer,
        registry: &mut dyn PortalRegistry,
    ) -> Result<GraphStats> {
        let mut walk = GraphWalk {
            max_recursion_depth: self.max_recursion_depth,
            candidates: registry.keys(),
            base_projection: *aux_camera.projection_matrix(),
            aux_camera,
            pool,
            renderer,
            registry,
            stats: GraphStats::default(),
        };
        walk.visit(main_camera, None, 0)?;
        Ok(walk.stats)
    }
}

/// Borrows held for the duration of one graph build.
struct GraphWalk<'a> {
    max_recursion_depth: u32,
    /// Every registered portal, in registry order
    candidates: Vec<PortalKey>,
    base_projection: Mat4,
    aux_camera: &'a mut Camera,
    pool: &'a mut RenderTargetPool,
    renderer: &'a mut dyn Renderer,
    registry: &'a mut dyn PortalRegistry,
    stats: GraphStats,
}

/// What a candidate needs to become a node, read before recursing.
struct Traversal {
    exit: PortalKey,
    link: PortalLink,
    exit_plane: Vec4,
}

impl GraphWalk<'_> {
    /// Render every portal seen from `camera` except `excluded`, the exit
    /// `camera` was placed behind.
    fn visit(&mut self, camera: &Camera, excluded: Option<PortalKey>, depth: u32) -> Result<()> {
        if depth >= self.max_recursion_depth {
            return Ok(());
        }

        for index in 0..self.candidates.len() {
            let key = self.candidates[index];
            if Some(key) == excluded {
                continue;
            }
            let Some(traversal) = self.traversal(camera, key) else {
                continue;
            };

            let target = match self.pool.acquire(&mut *self.renderer) {
                Ok(target) => target,
                Err(Error::PoolExhausted { max_allocations }) => {
                    if self.stats.skipped_exhausted == 0 {
                        crate::engine_warn!("portal3d::VisibilityGraph",
                            "Render target pool exhausted ({} allocations), skipping portal views",
                            max_allocations);
                    }
                    self.stats.skipped_exhausted += 1;
                    continue;
                }
                Err(err) => return Err(err),
            };

            let node_camera = self.node_camera(camera, &traversal);

            self.visit(&node_camera, Some(traversal.exit), depth + 1)?;

            crate::engine_trace!("portal3d::VisibilityGraph",
                "Rendering portal {:?} at depth {}", key, depth);
            self.render_node(node_camera, key, target)?;
            self.stats.nodes.push(RecursionNode { portal: key, depth });
        }

        Ok(())
    }

    /// Link data for `key` if it is linked, faces `camera` and is in its frustum
    fn traversal(&self, camera: &Camera, key: PortalKey) -> Option<Traversal> {
        let portal = self.registry.get(key)?;
        let exit = portal.destination()?;
        let destination = self.registry.get(exit)?;

        if !portal.faces_viewer(camera.position())
            || !camera.frustum().intersects_aabb(&portal.bounds())
        {
            return None;
        }

        Some(Traversal {
            exit,
            link: PortalLink::between(portal, destination),
            exit_plane: destination.exit_plane(),
        })
    }

    /// Camera seeing through the portal: relocated by the link, near plane
    /// replaced by the exit plane.
    fn node_camera(&self, camera: &Camera, traversal: &Traversal) -> Camera {
        let world = traversal.link.transform_pose(&camera.world_matrix());
        let view = world.inverse();

        let clip_plane = plane_to_view_space(&view, traversal.exit_plane);
        let projection = if clip_plane.w.abs() < NEAR_CLIP_LIMIT {
            self.base_projection
        } else {
            oblique_projection(&self.base_projection, clip_plane)
        };

        let mut node_camera = self.aux_camera.clone();
        node_camera.set_view_projection(view, projection);
        node_camera
    }

    fn render_node(
        &mut self,
        node_camera: Camera,
        key: PortalKey,
        target: Arc<dyn RenderTarget>,
    ) -> Result<()> {
        *self.aux_camera = node_camera;
        self.renderer.render_to_target(&*self.aux_camera, target.as_ref())?;
        self.registry.assign_surface_texture(key, target);
        Ok(())
    }
}

#[cfg(test)]
#[path = "visibility_graph_tests.rs"]
mod tests;
