use attpc::{Config, GasModel, Tracker};

/// Zero field, zero stopping power: straight line, z stays ~0 for a polar
/// angle of pi/2.
#[test]
fn s1_straight_line_vacuum() {
    let gas = GasModel::new(vec![0.0; 10], vec![0.0; 10]).unwrap();
    let mut cfg = Config::default();
    cfg.e_field = [0.0; 3];
    cfg.b_field = [0.0; 3];
    cfg.dt_seconds = 1.0e-9;
    cfg.max_samples = 10;
    let tracker = Tracker::new(&gas, cfg).unwrap();

    let traj = tracker
        .track_particle(0.0, 0.0, 0.0, 2.0, 0.0, std::f64::consts::FRAC_PI_2)
        .unwrap();

    let z = traj.z();
    for &zi in z.iter() {
        assert!(zi.abs() < 1e-9, "z={zi} should stay near 0 over 10ns in vacuum");
    }
}

/// 0.5 T axial field, 4-He at 2 MeV/u along +x: curvature radius should
/// match p / (|q| B) to 1%.
#[test]
fn s2_axial_field_deflection() {
    use attpc::{ELEMENTARY_CHARGE_C, PROTON_MASS_MEV, SPEED_OF_LIGHT};

    let gas = GasModel::new(vec![0.0; 10], vec![0.0; 10]).unwrap();
    let mut cfg = Config::default();
    cfg.mass_number = 4;
    cfg.charge_number = 2;
    cfg.e_field = [0.0; 3];
    cfg.b_field = [0.0, 0.0, 0.5];
    cfg.dt_seconds = 1.0e-11;
    cfg.max_samples = 3000;
    cfg.chamber_radius_m = 10.0;
    cfg.chamber_length_m = 100.0;
    cfg.e_min_mev_per_u = 1.0e-6;
    let tracker = Tracker::new(&gas, cfg.clone()).unwrap();

    let traj = tracker
        .track_particle(0.0, 0.0, 0.5, 2.0, 0.0, std::f64::consts::FRAC_PI_2)
        .unwrap();

    let a = f64::from(cfg.mass_number);
    let mass_mev = a * PROTON_MASS_MEV;
    let total_e = a * (2.0 + PROTON_MASS_MEV);
    let p_mev_c = (total_e * total_e - mass_mev * mass_mev).sqrt();

    let attpc_common_mev_to_joule = ELEMENTARY_CHARGE_C * 1.0e6;
    let p_si = p_mev_c * attpc_common_mev_to_joule / SPEED_OF_LIGHT;
    let expected_r = p_si / (f64::from(cfg.charge_number) * ELEMENTARY_CHARGE_C * cfg.b_field[2]);

    let xs = traj.x();
    let ys = traj.y();
    let max_r = (0..traj.len())
        .map(|i| (xs[i] * xs[i] + ys[i] * ys[i]).sqrt())
        .fold(0.0_f64, f64::max);

    assert!(
        (max_r - expected_r).abs() / expected_r < 0.01,
        "max_r={max_r} expected_r={expected_r}"
    );
}

/// Constant stopping power gas: total range should match the analytic
/// `(E0 - E_min) / dE/dx` to 5%.
#[test]
fn s3_stopping_range() {
    let stopping_mev_per_m = 20.0;
    let gas = GasModel::new(vec![stopping_mev_per_m; 5000], vec![0.0; 1000]).unwrap();
    let mut cfg = Config::default();
    cfg.mass_number = 4;
    cfg.charge_number = 2;
    cfg.e_field = [0.0; 3];
    cfg.b_field = [0.0; 3];
    cfg.dt_seconds = 1.0e-10;
    cfg.max_samples = 200_000;
    cfg.chamber_radius_m = 10.0;
    cfg.chamber_length_m = 100.0;
    cfg.e_min_mev_per_u = 1.0e-3;
    let tracker = Tracker::new(&gas, cfg.clone()).unwrap();

    let e0 = 3.0;
    let traj = tracker.track_particle(0.0, 0.0, 50.0, e0, 0.0, 0.0).unwrap();

    let expected_range = (e0 - cfg.e_min_mev_per_u) / stopping_mev_per_m;
    let actual_range = traj.path_length();

    assert!(
        (actual_range - expected_range).abs() / expected_range < 0.05,
        "actual_range={actual_range} expected_range={expected_range}"
    );
}
