extern crate easel;
extern crate env_logger;

use easel::prelude::*;

const VS: &str = "attribute vec3 Position; void main() { gl_Position = vec4(Position, 1.0); }";
const FS: &str = "uniform vec4 u_Color; void main() { gl_FragColor = u_Color; }";

fn device() -> (GraphicsDevice, CallLog, HeadlessWindow) {
    let _ = env_logger::try_init();

    let driver = HeadlessDriver::new();
    let log = driver.log().clone();
    let window = HeadlessWindow::default();

    let device = GraphicsDevice::new(
        Box::new(window.clone()),
        VideoSettings::default(),
        move |_| Ok(Box::new(driver)),
    )
    .unwrap();

    (device, log, window)
}

fn triangle(device: &mut GraphicsDevice) -> VertexBufferHandle {
    let layout = VertexLayout::build()
        .with(0, ElementType::Float, 3, false)
        .finish();

    let bytes = [0u8; 36];
    device
        .make_vertex_buffer(Some(&bytes), bytes.len(), layout, BufferUsage::Static)
        .unwrap()
}

fn binds(log: &CallLog) -> usize {
    log.count(|v| match *v {
        Call::BindProgram(_) => true,
        _ => false,
    })
}

fn draws(log: &CallLog) -> usize {
    log.count(|v| match *v {
        Call::Draw { .. } | Call::DrawIndexed { .. } => true,
        _ => false,
    })
}

#[test]
fn clear_and_draw() {
    let (mut device, log, window) = device();
    let vbo = triangle(&mut device);
    let program = device.program_from_sources(VS, FS);
    let material = device
        .build_material()
        .with_program(program)
        .with_alpha_mode(AlphaMode::Opaque)
        .with_param("u_Color", [1.0f32, 0.0, 0.0, 1.0])
        .finish()
        .unwrap();

    log.clear();

    let mut cmds = device.make_command_list();
    cmds.clear()
        .color(Color::red())
        .clear_color(true)
        .clear_depth(false);
    cmds.draw().vertex_buffer(vbo).vertex_count(3).material(material);

    let stats = device.submit(cmds);
    assert_eq!(stats.commands, 2);
    assert_eq!(stats.draws, 1);
    assert_eq!(stats.triangles, 1);
    assert_eq!(window.swaps(), 0);

    let calls = log.calls();
    let visits: Vec<_> = calls
        .iter()
        .filter(|v| match **v {
            Call::Clear { .. } | Call::Draw { .. } | Call::DrawIndexed { .. } => true,
            _ => false,
        })
        .cloned()
        .collect();

    assert_eq!(
        visits,
        vec![
            Call::Clear {
                color: Some(Color::red()),
                depth: None,
            },
            Call::Draw {
                vertex_buffer: vbo,
                primitive: Primitive::Triangles,
                first: 0,
                count: 3,
            },
        ]
    );

    assert_eq!(calls.first(), visits.first());
    assert!(calls.contains(&Call::BindProgram(program)));
    assert!(calls.contains(&Call::Uniform {
        program,
        name: "u_Color".into(),
        value: ParamValue::Vec4([1.0, 0.0, 0.0, 1.0]),
    }));
}

#[test]
fn huge_draws_saturate_stats() {
    let (mut device, log, _) = device();
    let vbo = triangle(&mut device);
    log.clear();

    let mut cmds = device.make_command_list();
    for _ in 0..2 {
        cmds.draw()
            .vertex_buffer(vbo)
            .vertex_count(u32::max_value())
            .primitive(Primitive::TriangleStrip);
    }

    let stats = device.submit(cmds);
    assert_eq!(stats.draws, 2);
    assert_eq!(stats.failures, 0);
    assert_eq!(stats.triangles, u32::max_value());
    assert_eq!(draws(&log), 2);
}

#[test]
fn static_buffers_reject_fills() {
    let (mut device, log, _) = device();
    let fixed = triangle(&mut device);
    let layout = VertexLayout::build()
        .with(0, ElementType::Float, 3, false)
        .finish();
    let dynamic = device
        .make_vertex_buffer(None, 36, layout, BufferUsage::Dynamic)
        .unwrap();

    log.clear();
    let mut cmds = device.make_command_list();
    cmds.fill_vertex_buffer().handle(fixed).data(&[0; 12]);
    cmds.fill_vertex_buffer().handle(dynamic).data(&[0; 12]);

    let stats = device.submit(cmds);
    assert_eq!(stats.commands, 2);
    assert_eq!(stats.failures, 1);
    assert_eq!(stats.skipped, 0);
    assert_eq!(
        log.calls(),
        vec![Call::UpdateVertexBuffer {
            handle: dynamic,
            usage: BufferUsage::Dynamic,
            offset: 0,
            len: 12,
        }]
    );
}

#[test]
fn invalid_handles() {
    let (mut device, log, _) = device();
    log.clear();

    let mut cmds = device.make_command_list();
    cmds.draw().vertex_count(3);
    cmds.draw()
        .vertex_buffer(VertexBufferHandle::new(9))
        .vertex_count(3);
    cmds.fill_vertex_buffer()
        .handle(VertexBufferHandle::new(7))
        .data(&[1, 2, 3]);
    cmds.fill_index_buffer()
        .handle(IndexBufferHandle::INVALID)
        .data(&[1, 2, 3]);
    cmds.frame_buffer().handle(FrameBufferHandle::new(5));
    cmds.frame_buffer_texture()
        .frame_buffer(FrameBufferHandle::new(5))
        .texture(TextureHandle::new(3));
    cmds.generate_mipmaps().texture(TextureHandle::new(4));
    cmds.set_material_parameters()
        .material(MaterialHandle::new(2))
        .set("u_Color", 1.0f32);

    let stats = device.submit(cmds);
    assert!(log.is_empty());
    assert_eq!(stats.commands, 8);
    assert_eq!(stats.skipped, 8);
    assert_eq!(stats.failures, 0);
    assert_eq!(stats.draws, 0);
}

#[test]
fn destroyed_handles() {
    let (mut device, log, _) = device();
    let vbo = triangle(&mut device);
    let texture = device
        .build_texture()
        .with_dimensions(4, 4)
        .finish()
        .unwrap();

    device.destroy_vertex_buffer(vbo);
    device.destroy_texture(texture);
    log.clear();

    // Destroying twice is a no-op too.
    device.destroy_vertex_buffer(vbo);
    device.destroy_texture(texture);

    let mut cmds = device.make_command_list();
    cmds.draw().vertex_buffer(vbo).vertex_count(3);
    cmds.fill_vertex_buffer().handle(vbo).data(&[0; 12]);
    cmds.generate_mipmaps().texture(texture);

    let stats = device.submit(cmds);
    assert!(log.is_empty());
    assert_eq!(stats.skipped, 3);
}

#[test]
fn state_diffing() {
    let (mut device, log, _) = device();
    let vbo = triangle(&mut device);

    let p1 = device.program_from_sources(VS, FS);
    let p2 = device.program_from_sources(VS, "void main() { gl_FragColor = vec4(1.0); }");
    assert_ne!(p1, p2);

    let m1 = device.build_material().with_program(p1).finish().unwrap();
    let m2 = device.build_material().with_program(p1).finish().unwrap();
    let m3 = device.build_material().with_program(p2).finish().unwrap();

    // Identical materials bind the program once.
    log.clear();
    let mut cmds = device.make_command_list();
    cmds.draw().vertex_buffer(vbo).vertex_count(3).material(m1);
    cmds.draw().vertex_buffer(vbo).vertex_count(3).material(m2);
    device.submit(cmds);
    assert_eq!(binds(&log), 1);
    assert_eq!(draws(&log), 2);

    // Different programs bind twice.
    log.clear();
    let mut cmds = device.make_command_list();
    cmds.draw().vertex_buffer(vbo).vertex_count(3).material(m1);
    cmds.draw().vertex_buffer(vbo).vertex_count(3).material(m3);
    device.submit(cmds);
    assert_eq!(binds(&log), 2);

    // The fixed-function state is issued once per submission, and only the changed
    // parts are issued again.
    let m4 = device
        .build_material()
        .with_program(p1)
        .with_cull_face(CullFace::Nothing)
        .finish()
        .unwrap();

    log.clear();
    let mut cmds = device.make_command_list();
    cmds.draw().vertex_buffer(vbo).vertex_count(3).material(m1);
    cmds.draw().vertex_buffer(vbo).vertex_count(3).material(m4);
    device.submit(cmds);

    let culls: Vec<_> = log
        .calls()
        .into_iter()
        .filter_map(|v| match v {
            Call::CullFace(face) => Some(face),
            _ => None,
        })
        .collect();

    assert_eq!(culls, vec![CullFace::Back, CullFace::Nothing]);
    assert_eq!(binds(&log), 1);
    assert_eq!(log.count(|v| *v == Call::DepthTest(true)), 1);
}

#[test]
fn draws_without_material_reset_state() {
    let (mut device, log, _) = device();
    let vbo = triangle(&mut device);
    let program = device.program_from_sources(VS, FS);
    let material = device.build_material().with_program(program).finish().unwrap();

    log.clear();
    let mut cmds = device.make_command_list();
    cmds.draw().vertex_buffer(vbo).vertex_count(3).material(material);
    cmds.draw().vertex_buffer(vbo).vertex_count(3);
    cmds.draw().vertex_buffer(vbo).vertex_count(3).material(material);
    let stats = device.submit(cmds);

    assert_eq!(stats.draws, 3);
    assert_eq!(binds(&log), 2);
}

#[test]
fn placeholder_programs_are_never_drawn() {
    let (mut device, log, _) = device();
    let vbo = triangle(&mut device);
    let program = device.program_from_sources(VS, "");
    let material = device.build_material().with_program(program).finish().unwrap();

    log.clear();
    let mut cmds = device.make_command_list();
    cmds.draw().vertex_buffer(vbo).vertex_count(3).material(material);
    let stats = device.submit(cmds);

    assert_eq!(stats.skipped, 1);
    assert!(log.is_empty());
}

#[test]
fn indexed_draw() {
    let (mut device, log, _) = device();
    let vbo = triangle(&mut device);
    let ibo = device
        .make_index_buffer(None, 12, IndexType::U16, BufferUsage::Dynamic)
        .unwrap();

    log.clear();
    let mut cmds = device.make_command_list();
    cmds.fill_index_buffer().handle(ibo).offset(2).data(&[0, 0, 1, 0, 2, 0]);
    cmds.draw()
        .vertex_buffer(vbo)
        .index_buffer(ibo)
        .index_offset(1)
        .index_count(6)
        .primitive(Primitive::TriangleStrip);

    let stats = device.submit(cmds);
    assert_eq!(stats.triangles, 4);
    assert_eq!(
        log.calls(),
        vec![
            Call::UpdateIndexBuffer {
                handle: ibo,
                usage: BufferUsage::Dynamic,
                offset: 2,
                len: 6,
            },
            Call::DrawIndexed {
                vertex_buffer: vbo,
                index_buffer: ibo,
                primitive: Primitive::TriangleStrip,
                offset: 1,
                count: 6,
            },
        ]
    );
}

#[test]
fn material_parameters() {
    let (mut device, log, _) = device();
    let vbo = triangle(&mut device);
    let program = device.program_from_sources(VS, FS);
    let material = device
        .build_material()
        .with_program(program)
        .with_param("u_Color", [1.0f32, 1.0, 1.0, 1.0])
        .finish()
        .unwrap();

    log.clear();
    let mut cmds = device.make_command_list();
    cmds.set_material_parameters()
        .material(material)
        .set("u_Color", [0.0f32, 1.0, 0.0, 1.0])
        .set("u_Unknown", 2.0f32);
    cmds.draw().vertex_buffer(vbo).vertex_count(3).material(material);
    device.submit(cmds);

    assert!(log.calls().contains(&Call::Uniform {
        program,
        name: "u_Color".into(),
        value: ParamValue::Vec4([0.0, 1.0, 0.0, 1.0]),
    }));

    let material = device.material(material).unwrap();
    assert_eq!(material.len(), 1);
    assert!(material.get("u_Unknown").is_none());
}

#[test]
fn texture_units() {
    let (mut device, log, _) = device();
    let vbo = triangle(&mut device);
    let program = device.program_from_sources(VS, FS);

    let t1 = device.build_texture().with_dimensions(2, 2).finish().unwrap();
    let t2 = device.build_texture().with_dimensions(2, 2).finish().unwrap();
    let material = device
        .build_material()
        .with_program(program)
        .with_param("u_Diffuse", t1)
        .with_param("u_Alpha", 0.5f32)
        .with_param("u_Normal", t2)
        .finish()
        .unwrap();

    log.clear();
    let mut cmds = device.make_command_list();
    cmds.draw().vertex_buffer(vbo).vertex_count(3).material(material);
    device.submit(cmds);

    let units: Vec<_> = log
        .calls()
        .into_iter()
        .filter_map(|v| match v {
            Call::BindTexture { unit, texture, .. } => Some((unit, texture)),
            _ => None,
        })
        .collect();

    assert_eq!(units, vec![(0, t1), (1, t2)]);
}

#[test]
fn render_to_texture() {
    let (mut device, log, _) = device();
    let fb = device
        .build_frame_buffer()
        .with_dimensions(32, 32)
        .with_attachment(Attachment::Color(0), PixelFormat::RGBA8)
        .finish()
        .unwrap();

    let extra = device
        .build_texture()
        .with_format(PixelFormat::RGBA8)
        .with_dimensions(32, 32)
        .finish()
        .unwrap();

    let depth = device
        .build_texture()
        .with_format(PixelFormat::Depth24)
        .with_dimensions(32, 32)
        .finish()
        .unwrap();

    log.clear();
    let mut cmds = device.make_command_list();
    cmds.frame_buffer().handle(fb);
    cmds.frame_buffer_texture()
        .frame_buffer(fb)
        .texture(extra)
        .attachment(Attachment::Color(1));
    cmds.frame_buffer_texture()
        .frame_buffer(fb)
        .texture(depth)
        .attachment(Attachment::Color(2));
    cmds.frame_buffer().handle(FrameBufferHandle::MAIN);
    let stats = device.submit(cmds);

    // Depth textures could not be attached to color points.
    assert_eq!(stats.failures, 1);
    assert_eq!(
        log.calls(),
        vec![
            Call::BindFrameBuffer(fb),
            Call::AttachTexture {
                handle: fb,
                attachment: Attachment::Color(1),
                texture: extra,
            },
            Call::BindFrameBuffer(FrameBufferHandle::MAIN),
        ]
    );

    assert_eq!(device.render_texture(fb, Attachment::Color(1)), Some(extra));
}

#[test]
fn sort_on_submit() {
    let (mut device, log, _) = device();
    let vbo = triangle(&mut device);

    log.clear();
    let mut cmds = device.make_command_list();
    cmds.make_command_buffer_keyed(SortKey::new(2))
        .draw()
        .vertex_buffer(vbo)
        .vertex_count(6);
    cmds.make_command_buffer_keyed(SortKey::new(1))
        .draw()
        .vertex_buffer(vbo)
        .vertex_count(3);
    device.submit(cmds);

    let counts: Vec<_> = log
        .calls()
        .into_iter()
        .filter_map(|v| match v {
            Call::Draw { count, .. } => Some(count),
            _ => None,
        })
        .collect();

    assert_eq!(counts, vec![3, 6]);
}

#[test]
fn sort_keys_of_materials() {
    let (mut device, _, _) = device();
    let program = device.program_from_sources(VS, FS);
    let opaque = device.build_material().with_program(program).finish().unwrap();
    let blend = device
        .build_material()
        .with_program(program)
        .with_alpha_mode(AlphaMode::Blend)
        .finish()
        .unwrap();

    let k1 = device.make_sort_key(opaque, 1000.0);
    let k2 = device.make_sort_key(blend, 0.0);
    assert!(k1 < k2);
    assert_eq!(k1.material_identity(), k2.material_identity());
    assert!(k2.is_blend());
}
