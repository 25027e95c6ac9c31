//! Literal movement scenarios: a character capsule against hand-built
//! terrain, driven through [`Stepper::step`] with the same intent shape a
//! live client's input packet would populate.

use capsule_phys_core::{
    Aabb, InputBits, LiquidSample, LiquidType, ModelInstance, MoveFlags, PhysConfig, SceneQuery,
    SpeedTable, StaticMapTree, StepInput, Stepper, TerrainGrid, Triangle, Vec3,
};

const RADIUS: f32 = 0.3;
const HEIGHT: f32 = 1.8;
const RUN_SPEED: f32 = 7.0;

fn ground_quad(min_x: f32, max_x: f32, min_y: f32, max_y: f32, z: f32) -> Vec<Triangle> {
    vec![
        Triangle::new(
            Vec3::new(min_x, min_y, z),
            Vec3::new(max_x, min_y, z),
            Vec3::new(max_x, max_y, z),
        ),
        Triangle::new(
            Vec3::new(min_x, min_y, z),
            Vec3::new(max_x, max_y, z),
            Vec3::new(min_x, max_y, z),
        ),
    ]
}

/// A vertical wall facing -x (blocks +x travel), spanning `[min_y, max_y]`
/// and `[0, height]` at `x`.
fn wall_facing_negative_x(x: f32, min_y: f32, max_y: f32, height: f32) -> Vec<Triangle> {
    vec![
        Triangle::new(
            Vec3::new(x, min_y, 0.0),
            Vec3::new(x, min_y, height),
            Vec3::new(x, max_y, height),
        ),
        Triangle::new(
            Vec3::new(x, min_y, 0.0),
            Vec3::new(x, max_y, height),
            Vec3::new(x, max_y, 0.0),
        ),
    ]
}

fn forward_input(feet: Vec3, dt: f32, run: f32) -> StepInput {
    StepInput {
        map_id: 1,
        feet,
        capsule_radius: RADIUS,
        capsule_height: HEIGHT,
        orientation: 0.0,
        pitch: 0.0,
        input_bits: InputBits::FORWARD,
        speeds: SpeedTable::uniform(run),
        dt_seconds: dt,
        current_vertical_velocity: 0.0,
        fall_time: 0.0,
        in_flags: MoveFlags::NONE,
        physics_flags: 0,
        transport_guid: None,
    }
}

#[test]
fn s1_forward_walk_on_flat_ground_advances_and_stays_grounded() {
    let mut scene = SceneQuery::new();
    let mut terrain = TerrainGrid::new();
    terrain.load_tile(0, 0, ground_quad(-200.0, 200.0, -200.0, 200.0, 0.0));
    let tree = StaticMapTree::build(Vec::<ModelInstance>::new(), 0);
    scene.load_map(1, tree, terrain);

    let config = PhysConfig::default();
    let input = forward_input(Vec3::new(0.0, 0.0, 0.0), 1.0 / 30.0, RUN_SPEED);
    let output = Stepper::step(&scene, &input, &config).unwrap();

    assert!((output.new_feet.x - 0.233).abs() < 0.02);
    assert!(output.new_feet.y.abs() < 1e-3);
    assert!(output.out_flags.contains(MoveFlags::GROUNDED));
    assert!(output.out_flags.contains(MoveFlags::MOVED));
    assert!(output.velocity.z.abs() < 1e-6);
}

#[test]
fn s2_head_on_wall_blocks_lateral_velocity_and_settles_at_skin_distance() {
    let mut scene = SceneQuery::new();
    let mut terrain = TerrainGrid::new();
    let mut tris = ground_quad(-200.0, 200.0, -200.0, 200.0, 0.0);
    tris.extend(wall_facing_negative_x(0.8, -5.0, 5.0, 4.0));
    terrain.load_tile(0, 0, tris);
    let tree = StaticMapTree::build(Vec::<ModelInstance>::new(), 0);
    scene.load_map(1, tree, terrain);

    let config = PhysConfig::default();
    let mut feet = Vec3::new(0.0, 0.0, 0.0);
    let mut output = None;
    for _ in 0..60 {
        let input = forward_input(feet, 1.0 / 30.0, RUN_SPEED);
        let result = Stepper::step(&scene, &input, &config).unwrap();
        feet = result.new_feet;
        output = Some(result);
    }
    let output = output.unwrap();

    assert!(output.new_feet.x > 0.3 && output.new_feet.x < 0.6);
    assert!(output.velocity.x.abs() < 1e-3);
    assert!(output.velocity.y.abs() < 1e-3);
    assert!(output.out_flags.contains(MoveFlags::GROUNDED));
    assert!(output.out_flags.contains(MoveFlags::BLOCKED));
}

#[test]
fn s3_auto_step_climbs_a_rise_within_step_height() {
    let mut scene = SceneQuery::new();
    let mut terrain = TerrainGrid::new();
    let mut tris = ground_quad(-200.0, 0.5, -200.0, 200.0, 0.0);
    tris.extend(ground_quad(0.5, 200.0, -200.0, 200.0, 2.0));
    tris.extend(wall_facing_negative_x(0.5, -200.0, 200.0, 2.0));
    terrain.load_tile(0, 0, tris);
    let tree = StaticMapTree::build(Vec::<ModelInstance>::new(), 0);
    scene.load_map(1, tree, terrain);

    let config = PhysConfig::default();
    let input = forward_input(Vec3::new(0.0, 0.0, 0.0), 0.2, RUN_SPEED);
    let output = Stepper::step(&scene, &input, &config).unwrap();

    assert!((output.new_feet.z - 2.0).abs() < 0.05);
    assert!(output.out_flags.contains(MoveFlags::GROUNDED));
    assert!(output.out_flags.contains(MoveFlags::STEPPED_UP));
}

#[test]
fn s4_walking_off_a_ledge_snaps_down_to_the_lower_floor() {
    let mut scene = SceneQuery::new();
    let mut terrain = TerrainGrid::new();
    let mut tris = ground_quad(-200.0, 0.4, -200.0, 200.0, 0.0);
    tris.extend(ground_quad(0.4, 200.0, -200.0, 200.0, -3.0));
    terrain.load_tile(0, 0, tris);
    let tree = StaticMapTree::build(Vec::<ModelInstance>::new(), 0);
    scene.load_map(1, tree, terrain);

    let config = PhysConfig::default();
    let input = forward_input(Vec3::new(0.0, 0.0, 0.0), 0.2, RUN_SPEED);
    let output = Stepper::step(&scene, &input, &config).unwrap();

    assert!((output.new_feet.z - (-3.0)).abs() < 0.05);
    assert!(output.out_flags.contains(MoveFlags::GROUNDED));
}

#[test]
fn s5_jump_from_ground_sets_upward_velocity_and_leaves_ground() {
    let mut scene = SceneQuery::new();
    let mut terrain = TerrainGrid::new();
    terrain.load_tile(0, 0, ground_quad(-200.0, 200.0, -200.0, 200.0, 0.0));
    let tree = StaticMapTree::build(Vec::<ModelInstance>::new(), 0);
    scene.load_map(1, tree, terrain);

    let config = PhysConfig::default();
    let mut input = StepInput {
        map_id: 1,
        feet: Vec3::new(0.0, 0.0, 0.0),
        capsule_radius: RADIUS,
        capsule_height: HEIGHT,
        orientation: 0.0,
        pitch: 0.0,
        input_bits: InputBits::NONE,
        speeds: SpeedTable::uniform(0.0),
        dt_seconds: 1.0 / 30.0,
        current_vertical_velocity: 0.0,
        fall_time: 0.0,
        in_flags: MoveFlags::NONE,
        physics_flags: 0,
        transport_guid: None,
    };
    input.in_flags.set(MoveFlags::JUMPING);

    let output = Stepper::step(&scene, &input, &config).unwrap();

    let expected_vz = config.jump_vz - config.gravity_mps2 * input.dt_seconds;
    assert!((output.velocity.z - expected_vz).abs() < 1e-3);
    assert!(!output.out_flags.contains(MoveFlags::GROUNDED));
    assert!(output.out_flags.contains(MoveFlags::JUMPING));
    assert!(!output.out_flags.contains(MoveFlags::FALLINGFAR));
}

#[test]
fn s6_standing_in_a_deep_pool_enters_swimming_with_gravity_disabled() {
    let mut scene = SceneQuery::new();
    let mut terrain = TerrainGrid::new();
    terrain.load_tile(0, 0, ground_quad(-200.0, 200.0, -200.0, 200.0, -50.0));
    let tree = StaticMapTree::build(Vec::<ModelInstance>::new(), 0);
    scene.load_map(1, tree, terrain);
    scene
        .set_liquids(
            1,
            vec![(
                Aabb::new(Vec3::new(-50.0, -50.0, -50.0), Vec3::new(50.0, 50.0, 10.0)),
                LiquidSample {
                    liquid_type: LiquidType::Water,
                    surface_z: 10.0,
                },
            )],
        )
        .unwrap();

    let config = PhysConfig::default();
    let input = StepInput {
        map_id: 1,
        feet: Vec3::new(0.0, 0.0, 6.0),
        capsule_radius: RADIUS,
        capsule_height: HEIGHT,
        orientation: 0.0,
        pitch: 0.0,
        input_bits: InputBits::NONE,
        speeds: SpeedTable::uniform(0.0),
        dt_seconds: 1.0 / 30.0,
        current_vertical_velocity: -5.0,
        fall_time: 1.0,
        in_flags: MoveFlags::NONE,
        physics_flags: 0,
        transport_guid: None,
    };

    let output = Stepper::step(&scene, &input, &config).unwrap();

    assert!(output.out_flags.contains(MoveFlags::SWIMMING));
    assert!(output.out_flags.contains(MoveFlags::IN_LIQUID));
    assert_eq!(output.liquid_type, LiquidType::Water);
    assert!((output.liquid_z - 10.0).abs() < 1e-6);
    assert!(output.velocity.z.abs() < 1e-6);
    assert!(!output.out_flags.contains(MoveFlags::FALLING));
}

#[test]
fn stepper_direct_call_does_not_move_upward_while_falling() {
    let mut scene = SceneQuery::new();
    let mut terrain = TerrainGrid::new();
    terrain.load_tile(0, 0, ground_quad(-200.0, 200.0, -200.0, 200.0, 0.0));
    let tree = StaticMapTree::build(Vec::<ModelInstance>::new(), 0);
    scene.load_map(1, tree, terrain);

    let config = PhysConfig::default();
    let input = StepInput {
        map_id: 1,
        feet: Vec3::new(0.0, 0.0, 0.3),
        capsule_radius: RADIUS,
        capsule_height: HEIGHT,
        orientation: 0.0,
        pitch: 0.0,
        input_bits: InputBits::NONE,
        speeds: SpeedTable::uniform(0.0),
        dt_seconds: 0.05,
        current_vertical_velocity: -1.0,
        fall_time: 0.5,
        in_flags: MoveFlags::NONE,
        physics_flags: 0,
        transport_guid: None,
    };
    let output = Stepper::step(&scene, &input, &config).unwrap();
    assert!(output.new_feet.z <= input.feet.z);
}
