use super::post::{self, PostBindGroups, PostResources};
use super::scene::{ParticleLayer, SurfaceLayer};
use super::targets::RenderTargets;
use super::uniforms::{linear_rgb, CloudUniforms, PostUniforms, SceneUniforms};
use kaos_core::{Camera, FrameOutput, Particle, SurfaceMesh, BACKGROUND_RGB, POST_WGSL};

/// Owns every GPU object of the page. Dropped or [`destroy`](Self::destroy)ed
/// on teardown.
pub struct GpuState<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    view_format: wgpu::TextureFormat,

    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,
    surface_layer: SurfaceLayer,
    particle_layer: ParticleLayer,

    camera: Camera,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'w> GpuState<'w> {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        width: u32,
        height: u32,
        mesh: &SurfaceMesh,
        particles: &[Particle],
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Canvases usually only offer linear formats; render through an sRGB view.
        let view_format = format.add_srgb_suffix();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[render] surface {:?} (view {:?}) {}x{}", format, view_format, width, height);

        let targets = RenderTargets::new(&device, width, height);
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, view_format);
        let post_groups = post.bind_groups(&device, &targets);
        let surface_layer = SurfaceLayer::new(&device, mesh);
        let particle_layer = ParticleLayer::new(&device, particles);

        let mut camera = Camera::default();
        camera.set_viewport(width, height);
        let [r, g, b] = linear_rgb(BACKGROUND_RGB);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            targets,
            post,
            post_groups,
            surface_layer,
            particle_layer,
            camera,
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        })
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resize the swapchain and every size-dependent target. Zero sizes (a
    /// minimized window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.camera.set_viewport(width, height);
        self.targets.recreate(&self.device, width, height);
        self.post_groups = self.post.bind_groups(&self.device, &self.targets);
    }

    /// Re-apply the current configuration after `Lost` / `Outdated`.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Scene pass into the HDR target, bloom ping-pong, then composite with
    /// aberration, grain and vignette onto the swapchain.
    pub fn render(&mut self, frame: &FrameOutput) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });

        self.queue.write_buffer(
            &self.surface_layer.uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::new(&self.camera, &frame.uniforms)),
        );
        self.queue.write_buffer(
            &self.particle_layer.uniform_buffer,
            0,
            bytemuck::bytes_of(&CloudUniforms::new(&self.camera, &frame.particles)),
        );
        self.queue.write_buffer(
            &self.post.uniform_buffer,
            0,
            bytemuck::bytes_of(&PostUniforms::new(
                &frame.post,
                frame.time.elapsed_sec,
                self.width,
                self.height,
            )),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.surface_layer.draw(&mut rpass);
            self.particle_layer.draw(&mut rpass);
        }

        let g = &self.post_groups;
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &g.from_hdr,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_h_pipeline,
            &g.from_bloom_a,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_v_pipeline,
            &g.from_bloom_b,
            None,
        );
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &g.from_hdr,
            Some(&g.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Release textures and buffers immediately instead of waiting for drop.
    pub fn destroy(self) {
        self.targets.destroy();
        self.surface_layer.destroy();
        self.particle_layer.destroy();
        self.post.uniform_buffer.destroy();
        self.device.destroy();
        log::info!("[render] GPU resources released");
    }
}
