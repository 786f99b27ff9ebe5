use nalgebra::{Rotation3, Vector3};

/// Rotation composition order used throughout the toolbox.  An euler triple
/// (rx, ry, rz) always means R = Rx(rx) * Ry(ry) * Rz(rz), i.e. intrinsic
/// rotations applied about x, then the new y, then the new z.
pub fn rotation_from_euler_angles(rx: f64, ry: f64, rz: f64) -> Rotation3<f64> {
    let r_x = Rotation3::from_axis_angle(&Vector3::x_axis(), rx);
    let r_y = Rotation3::from_axis_angle(&Vector3::y_axis(), ry);
    let r_z = Rotation3::from_axis_angle(&Vector3::z_axis(), rz);
    return r_x * r_y * r_z;
}

pub fn rotation_from_euler_angles_in_degrees(rx: f64, ry: f64, rz: f64) -> Rotation3<f64> {
    return rotation_from_euler_angles(rx.to_radians(), ry.to_radians(), rz.to_radians());
}

/// Recovers the (rx, ry, rz) triple such that R = Rx(rx) * Ry(ry) * Rz(rz).
/// When ry sits at +-90 degrees the rx and rz axes align; in that case rz is
/// fixed to zero and the whole remaining rotation lands on rx.
pub fn euler_angles_from_rotation(rotation: &Rotation3<f64>) -> Vector3<f64> {
    let m02 = rotation[(0,2)].clamp(-1.0, 1.0);
    let ry = m02.asin();

    if 1.0 - m02.abs() < 1e-7 {
        let rz = 0.0;
        let rx = if m02 > 0.0 {
            rotation[(1,0)].atan2(rotation[(1,1)])
        } else {
            (-rotation[(1,0)]).atan2(rotation[(1,1)])
        };
        return Vector3::new(rx, ry, rz);
    }

    let rx = (-rotation[(1,2)]).atan2(rotation[(2,2)]);
    let rz = (-rotation[(0,1)]).atan2(rotation[(0,0)]);
    return Vector3::new(rx, ry, rz);
}

pub fn euler_angles_in_degrees_from_rotation(rotation: &Rotation3<f64>) -> Vector3<f64> {
    let out = euler_angles_from_rotation(rotation);
    return Vector3::new(out[0].to_degrees(), out[1].to_degrees(), out[2].to_degrees());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rotations_close(a: &Rotation3<f64>, b: &Rotation3<f64>, tol: f64) {
        let angle = a.angle_to(b);
        assert!(angle < tol, "rotations differ by {} rad", angle);
    }

    #[test]
    fn test_euler_composition_order_is_x_then_y_then_z() {
        let r = rotation_from_euler_angles_in_degrees(90.0, 0.0, 0.0);
        let p = r * Vector3::new(0.0, 1.0, 0.0);
        assert!((p - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);

        // Rx(90) * Rz(90) sends +x to +z; the reversed composition would send
        // it to +y instead.
        let r = rotation_from_euler_angles_in_degrees(90.0, 0.0, 90.0);
        let p = r * Vector3::new(1.0, 0.0, 0.0);
        assert!((p - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12, "got {:?}", p);
    }

    #[test]
    fn test_euler_round_trip() {
        let cases = [
            (10.0, 20.0, 30.0),
            (-45.0, 60.0, 120.0),
            (170.0, -80.0, -170.0),
            (0.0, 0.0, 0.0),
            (-10.0, 0.0, 250.0),
        ];
        for (rx, ry, rz) in cases {
            let r = rotation_from_euler_angles_in_degrees(rx, ry, rz);
            let e = euler_angles_in_degrees_from_rotation(&r);
            let r2 = rotation_from_euler_angles_in_degrees(e[0], e[1], e[2]);
            assert_rotations_close(&r, &r2, 1e-9);
        }
    }

    #[test]
    fn test_euler_round_trip_at_gimbal_lock() {
        for ry in [90.0, -90.0] {
            let r = rotation_from_euler_angles_in_degrees(25.0, ry, -40.0);
            let e = euler_angles_in_degrees_from_rotation(&r);
            assert_eq!(e[2], 0.0);
            let r2 = rotation_from_euler_angles_in_degrees(e[0], e[1], e[2]);
            assert_rotations_close(&r, &r2, 1e-9);
        }
    }
}
