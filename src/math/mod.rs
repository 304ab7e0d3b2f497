//! Mathematical kernel for the direct stiffness method

pub mod dense;
pub mod eigen;

use nalgebra::{DMatrix, DVector, Matrix3, SMatrix, SVector};

pub use dense::{Mat, Vec};
pub use eigen::EigenPair;

pub type Mat3 = Matrix3<f64>;

/// 12x12 matrix for frame element stiffness/mass
pub type Mat12 = SMatrix<f64, 12, 12>;
/// 12-element vector for frame element forces/displacements
pub type Vec12 = SVector<f64, 12>;

/// Compute the transformation matrix for a 3D frame element
///
/// Axis convention (PyNite's, locked by tests):
/// - vertical elements: local y in the XY plane, local z along global Z
/// - horizontal elements: local y = global Y, local z = x cross y
/// - inclined elements: local z horizontal (in the XZ plane), y = z cross x
///
/// # Arguments
/// * `i_node` - Start node coordinates [X, Y, Z]
/// * `j_node` - End node coordinates [X, Y, Z]
/// * `rotation` - Element rotation about its longitudinal axis (radians)
///
/// # Returns
/// 12x12 transformation matrix from global to local coordinates
pub fn frame_transformation_matrix(
    i_node: &[f64; 3],
    j_node: &[f64; 3],
    rotation: f64,
) -> Mat12 {
    let dx = j_node[0] - i_node[0];
    let dy = j_node[1] - i_node[1];
    let dz = j_node[2] - i_node[2];

    let length = (dx * dx + dy * dy + dz * dz).sqrt();
    debug_assert!(length > 1e-10, "element has zero length");

    // Direction cosines for local x-axis (along the element)
    let x = [dx / length, dy / length, dz / length];

    let (y, z) = if (x[0].abs() < 1e-10) && (x[2].abs() < 1e-10) {
        // Vertical element (only a Y component)
        if x[1] > 0.0 {
            // Pointing up: y = [-1, 0, 0], z = [0, 0, 1]
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0])
        } else {
            // Pointing down: y = [1, 0, 0], z = [0, 0, 1]
            ([1.0, 0.0, 0.0], [0.0, 0.0, 1.0])
        }
    } else if dy.abs() < 1e-10 {
        // Horizontal element: y = global Y, z = x cross y
        let y = [0.0, 1.0, 0.0];
        let z = normalize(cross(&x, &y));
        (y, z)
    } else {
        // Inclined element: local z horizontal, perpendicular to x
        let proj = [dx, 0.0, dz];
        let z = if x[1] > 0.0 {
            normalize(cross(&proj, &x))
        } else {
            normalize(cross(&x, &proj))
        };
        let y = normalize(cross(&z, &x));
        (y, z)
    };

    // Rotate local y/z about the longitudinal axis
    let (y, z) = if rotation.abs() > 1e-10 {
        let (sin_r, cos_r) = rotation.sin_cos();
        let y_rot = [
            y[0] * cos_r + z[0] * sin_r,
            y[1] * cos_r + z[1] * sin_r,
            y[2] * cos_r + z[2] * sin_r,
        ];
        let z_rot = [
            -y[0] * sin_r + z[0] * cos_r,
            -y[1] * sin_r + z[1] * cos_r,
            -y[2] * sin_r + z[2] * cos_r,
        ];
        (y_rot, z_rot)
    } else {
        (y, z)
    };

    let r = Mat3::new(
        x[0], x[1], x[2], //
        y[0], y[1], y[2], //
        z[0], z[1], z[2],
    );

    // Four identical 3x3 blocks on the diagonal
    let mut t = Mat12::zeros();
    for block in 0..4 {
        let offset = block * 3;
        for row in 0..3 {
            for col in 0..3 {
                t[(offset + row, offset + col)] = r[(row, col)];
            }
        }
    }

    t
}

fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Compute the local stiffness matrix for a prismatic 3D frame element
///
/// Independent blocks: axial EA/L, torsion GJ/L, Euler-Bernoulli bending
/// about local z (EIz, coupling uy/rz) and about local y (EIy, coupling
/// uz/ry, mirrored signs per the right-hand rule).
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `g` - Shear modulus
/// * `a` - Cross-sectional area
/// * `iy` - Moment of inertia about local y-axis
/// * `iz` - Moment of inertia about local z-axis
/// * `j` - Torsional constant
/// * `length` - Element length
pub fn frame_local_stiffness(
    e: f64,
    g: f64,
    a: f64,
    iy: f64,
    iz: f64,
    j: f64,
    length: f64,
) -> Mat12 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = e * a / l;
    let gj_l = g * j / l;

    let eiy_l3 = e * iy / l3;
    let eiy_l2 = e * iy / l2;
    let eiy_l = e * iy / l;

    let eiz_l3 = e * iz / l3;
    let eiz_l2 = e * iz / l2;
    let eiz_l = e * iz / l;

    #[rustfmt::skip]
    let data = [
        // Row 0: axial at i
        ea_l,      0.0,          0.0,           0.0,    0.0,           0.0,          -ea_l,     0.0,          0.0,           0.0,    0.0,           0.0,
        // Row 1: shear Fy at i
        0.0,       12.0*eiz_l3,  0.0,           0.0,    0.0,           6.0*eiz_l2,   0.0,       -12.0*eiz_l3, 0.0,           0.0,    0.0,           6.0*eiz_l2,
        // Row 2: shear Fz at i
        0.0,       0.0,          12.0*eiy_l3,   0.0,    -6.0*eiy_l2,   0.0,          0.0,       0.0,          -12.0*eiy_l3,  0.0,    -6.0*eiy_l2,   0.0,
        // Row 3: torsion at i
        0.0,       0.0,          0.0,           gj_l,   0.0,           0.0,          0.0,       0.0,          0.0,           -gj_l,  0.0,           0.0,
        // Row 4: moment My at i
        0.0,       0.0,          -6.0*eiy_l2,   0.0,    4.0*eiy_l,     0.0,          0.0,       0.0,          6.0*eiy_l2,    0.0,    2.0*eiy_l,     0.0,
        // Row 5: moment Mz at i
        0.0,       6.0*eiz_l2,   0.0,           0.0,    0.0,           4.0*eiz_l,    0.0,       -6.0*eiz_l2,  0.0,           0.0,    0.0,           2.0*eiz_l,
        // Row 6: axial at j
        -ea_l,     0.0,          0.0,           0.0,    0.0,           0.0,          ea_l,      0.0,          0.0,           0.0,    0.0,           0.0,
        // Row 7: shear Fy at j
        0.0,       -12.0*eiz_l3, 0.0,           0.0,    0.0,           -6.0*eiz_l2,  0.0,       12.0*eiz_l3,  0.0,           0.0,    0.0,           -6.0*eiz_l2,
        // Row 8: shear Fz at j
        0.0,       0.0,          -12.0*eiy_l3,  0.0,    6.0*eiy_l2,    0.0,          0.0,       0.0,          12.0*eiy_l3,   0.0,    6.0*eiy_l2,    0.0,
        // Row 9: torsion at j
        0.0,       0.0,          0.0,           -gj_l,  0.0,           0.0,          0.0,       0.0,          0.0,           gj_l,   0.0,           0.0,
        // Row 10: moment My at j
        0.0,       0.0,          -6.0*eiy_l2,   0.0,    2.0*eiy_l,     0.0,          0.0,       0.0,          6.0*eiy_l2,    0.0,    4.0*eiy_l,     0.0,
        // Row 11: moment Mz at j
        0.0,       6.0*eiz_l2,   0.0,           0.0,    0.0,           2.0*eiz_l,    0.0,       -6.0*eiz_l2,  0.0,           0.0,    0.0,           4.0*eiz_l,
    ];

    Mat12::from_row_slice(&data)
}

/// Compute the geometric stiffness matrix for an element carrying axial force
///
/// # Arguments
/// * `p` - Axial force (positive = tension, negative = compression)
/// * `a` - Cross-sectional area
/// * `iy` - Moment of inertia about y
/// * `iz` - Moment of inertia about z
/// * `length` - Element length
pub fn frame_geometric_stiffness(p: f64, a: f64, iy: f64, iz: f64, length: f64) -> Mat12 {
    if p.abs() < 1e-10 {
        return Mat12::zeros();
    }

    let l = length;
    let l2 = l * l;
    let ip = iy + iz;

    let p_l = p / l;

    #[rustfmt::skip]
    let data = [
        p_l,        0.0,         0.0,          0.0,           0.0,             0.0,            -p_l,       0.0,         0.0,          0.0,           0.0,             0.0,
        0.0,        6.0*p_l/5.0, 0.0,          0.0,           0.0,             p_l*l/10.0,     0.0,        -6.0*p_l/5.0,0.0,          0.0,           0.0,             p_l*l/10.0,
        0.0,        0.0,         6.0*p_l/5.0,  0.0,           -p_l*l/10.0,     0.0,            0.0,        0.0,         -6.0*p_l/5.0, 0.0,           -p_l*l/10.0,     0.0,
        0.0,        0.0,         0.0,          p_l*ip/a,      0.0,             0.0,            0.0,        0.0,         0.0,          -p_l*ip/a,     0.0,             0.0,
        0.0,        0.0,         -p_l*l/10.0,  0.0,           2.0*p_l*l2/15.0, 0.0,            0.0,        0.0,         p_l*l/10.0,   0.0,           -p_l*l2/30.0,    0.0,
        0.0,        p_l*l/10.0,  0.0,          0.0,           0.0,             2.0*p_l*l2/15.0,0.0,        -p_l*l/10.0, 0.0,          0.0,           0.0,             -p_l*l2/30.0,
        -p_l,       0.0,         0.0,          0.0,           0.0,             0.0,            p_l,        0.0,         0.0,          0.0,           0.0,             0.0,
        0.0,        -6.0*p_l/5.0,0.0,          0.0,           0.0,             -p_l*l/10.0,    0.0,        6.0*p_l/5.0, 0.0,          0.0,           0.0,             -p_l*l/10.0,
        0.0,        0.0,         -6.0*p_l/5.0, 0.0,           p_l*l/10.0,      0.0,            0.0,        0.0,         6.0*p_l/5.0,  0.0,           p_l*l/10.0,      0.0,
        0.0,        0.0,         0.0,          -p_l*ip/a,     0.0,             0.0,            0.0,        0.0,         0.0,          p_l*ip/a,      0.0,             0.0,
        0.0,        0.0,         -p_l*l/10.0,  0.0,           -p_l*l2/30.0,    0.0,            0.0,        0.0,         p_l*l/10.0,   0.0,           2.0*p_l*l2/15.0, 0.0,
        0.0,        -p_l*l/10.0, 0.0,          0.0,           0.0,             -p_l*l2/30.0,   0.0,        p_l*l/10.0,  0.0,          0.0,           0.0,             2.0*p_l*l2/15.0,
    ];

    Mat12::from_row_slice(&data)
}

/// Compute the consistent mass matrix for a prismatic 3D frame element
///
/// Standard ρAL/420 coefficients; the torsional block uses the polar moment
/// of inertia. Only the upper triangle is set directly, the lower triangle
/// is its mirror.
///
/// # Arguments
/// * `rho` - Mass density
/// * `a` - Cross-sectional area
/// * `iy` - Moment of inertia about y
/// * `iz` - Moment of inertia about z
/// * `length` - Element length
pub fn frame_consistent_mass(rho: f64, a: f64, iy: f64, iz: f64, length: f64) -> Mat12 {
    let l = length;
    let l2 = l * l;
    let jx = (iy + iz) / a;
    let scale = rho * a * l / 420.0;

    let mut m = Mat12::zeros();

    // Axial (ux)
    m[(0, 0)] = 140.0;
    m[(0, 6)] = 70.0;
    m[(6, 6)] = 140.0;

    // Torsion (rx)
    m[(3, 3)] = 140.0 * jx;
    m[(3, 9)] = 70.0 * jx;
    m[(9, 9)] = 140.0 * jx;

    // Bending in the x-y plane (uy, rz)
    m[(1, 1)] = 156.0;
    m[(1, 5)] = 22.0 * l;
    m[(1, 7)] = 54.0;
    m[(1, 11)] = -13.0 * l;
    m[(5, 5)] = 4.0 * l2;
    m[(5, 7)] = 13.0 * l;
    m[(5, 11)] = -3.0 * l2;
    m[(7, 7)] = 156.0;
    m[(7, 11)] = -22.0 * l;
    m[(11, 11)] = 4.0 * l2;

    // Bending in the x-z plane (uz, ry), mirrored signs
    m[(2, 2)] = 156.0;
    m[(2, 4)] = -22.0 * l;
    m[(2, 8)] = 54.0;
    m[(2, 10)] = 13.0 * l;
    m[(4, 4)] = 4.0 * l2;
    m[(4, 8)] = -13.0 * l;
    m[(4, 10)] = -3.0 * l2;
    m[(8, 8)] = 156.0;
    m[(8, 10)] = 22.0 * l;
    m[(10, 10)] = 4.0 * l2;

    // Mirror the upper triangle and scale
    for row in 0..12 {
        for col in row..12 {
            let value = m[(row, col)] * scale;
            m[(row, col)] = value;
            m[(col, row)] = value;
        }
    }

    m
}

/// Apply static condensation for released DOFs
///
/// # Arguments
/// * `k` - Full stiffness matrix
/// * `releases` - Boolean array indicating which DOFs are released
pub fn apply_releases(k: &Mat12, releases: &[bool; 12]) -> Mat12 {
    let unreleased: std::vec::Vec<usize> = releases
        .iter()
        .enumerate()
        .filter_map(|(i, &released)| if !released { Some(i) } else { None })
        .collect();

    let released: std::vec::Vec<usize> = releases
        .iter()
        .enumerate()
        .filter_map(|(i, &released)| if released { Some(i) } else { None })
        .collect();

    if released.is_empty() {
        return *k;
    }

    let n1 = unreleased.len();
    let n2 = released.len();

    // Partition into k11, k12, k21, k22
    let mut k11 = DMatrix::zeros(n1, n1);
    let mut k12 = DMatrix::zeros(n1, n2);
    let mut k21 = DMatrix::zeros(n2, n1);
    let mut k22 = DMatrix::zeros(n2, n2);

    for (i, &ui) in unreleased.iter().enumerate() {
        for (j, &uj) in unreleased.iter().enumerate() {
            k11[(i, j)] = k[(ui, uj)];
        }
        for (j, &rj) in released.iter().enumerate() {
            k12[(i, j)] = k[(ui, rj)];
        }
    }

    for (i, &ri) in released.iter().enumerate() {
        for (j, &uj) in unreleased.iter().enumerate() {
            k21[(i, j)] = k[(ri, uj)];
        }
        for (j, &rj) in released.iter().enumerate() {
            k22[(i, j)] = k[(ri, rj)];
        }
    }

    // Static condensation: k_cond = k11 - k12 * inv(k22) * k21
    let k22_inv = match k22.clone().try_inverse() {
        Some(inv) => inv,
        None => return *k,
    };

    let k_condensed = &k11 - &k12 * &k22_inv * &k21;

    // Expand back to 12x12 with zeros for released DOFs
    let mut k_result = Mat12::zeros();
    for (i, &ui) in unreleased.iter().enumerate() {
        for (j, &uj) in unreleased.iter().enumerate() {
            k_result[(ui, uj)] = k_condensed[(i, j)];
        }
    }

    k_result
}

/// Apply static condensation to a fixed-end reaction vector for released DOFs
///
/// # Arguments
/// * `fer` - Uncondensed fixed-end reaction vector
/// * `k` - Uncondensed local stiffness matrix
/// * `releases` - Boolean array indicating which DOFs are released
pub fn apply_fer_releases(fer: &Vec12, k: &Mat12, releases: &[bool; 12]) -> Vec12 {
    let unreleased: std::vec::Vec<usize> = releases
        .iter()
        .enumerate()
        .filter_map(|(i, &released)| if !released { Some(i) } else { None })
        .collect();

    let released: std::vec::Vec<usize> = releases
        .iter()
        .enumerate()
        .filter_map(|(i, &released)| if released { Some(i) } else { None })
        .collect();

    if released.is_empty() {
        return *fer;
    }

    let n1 = unreleased.len();
    let n2 = released.len();

    let mut k12 = DMatrix::zeros(n1, n2);
    let mut k22 = DMatrix::zeros(n2, n2);

    for (i, &ui) in unreleased.iter().enumerate() {
        for (j, &rj) in released.iter().enumerate() {
            k12[(i, j)] = k[(ui, rj)];
        }
    }
    for (i, &ri) in released.iter().enumerate() {
        for (j, &rj) in released.iter().enumerate() {
            k22[(i, j)] = k[(ri, rj)];
        }
    }

    let mut fer1 = DVector::zeros(n1);
    let mut fer2 = DVector::zeros(n2);
    for (i, &ui) in unreleased.iter().enumerate() {
        fer1[i] = fer[ui];
    }
    for (i, &ri) in released.iter().enumerate() {
        fer2[i] = fer[ri];
    }

    // fer_cond = fer1 - k12 * inv(k22) * fer2
    let k22_inv = match k22.clone().try_inverse() {
        Some(inv) => inv,
        None => return *fer,
    };

    let fer_condensed = &fer1 - &k12 * &k22_inv * &fer2;

    let mut fer_result = Vec12::zeros();
    for (i, &ui) in unreleased.iter().enumerate() {
        fer_result[ui] = fer_condensed[i];
    }

    fer_result
}

/// Fixed-end reactions for a uniform distributed load over the full length
///
/// Returns the support-reaction vector; its negation is the statically
/// equivalent nodal load.
///
/// # Arguments
/// * `w` - Load intensity (force per unit length)
/// * `length` - Element length
/// * `axis` - Local load axis (0=x, 1=y, 2=z)
pub fn fer_uniform_load(w: f64, length: f64, axis: usize) -> Vec12 {
    let l = length;
    let l2 = l * l;

    let mut fer = Vec12::zeros();

    match axis {
        0 => {
            fer[0] = -w * l / 2.0;
            fer[6] = -w * l / 2.0;
        }
        1 => {
            fer[1] = -w * l / 2.0;
            fer[5] = -w * l2 / 12.0;
            fer[7] = -w * l / 2.0;
            fer[11] = w * l2 / 12.0;
        }
        2 => {
            fer[2] = -w * l / 2.0;
            fer[4] = w * l2 / 12.0;
            fer[8] = -w * l / 2.0;
            fer[10] = -w * l2 / 12.0;
        }
        _ => {}
    }

    fer
}

/// Fixed-end reactions for a concentrated force
///
/// # Arguments
/// * `p` - Load magnitude
/// * `a` - Distance from the i-node to the load
/// * `length` - Element length
/// * `axis` - Local load axis (0=x, 1=y, 2=z)
pub fn fer_point_load(p: f64, a: f64, length: f64, axis: usize) -> Vec12 {
    let l = length;
    let b = l - a;
    let l2 = l * l;
    let l3 = l2 * l;

    let mut fer = Vec12::zeros();

    match axis {
        0 => {
            fer[0] = -p * b / l;
            fer[6] = -p * a / l;
        }
        1 => {
            fer[1] = -p * b * b * (3.0 * a + b) / l3;
            fer[5] = -p * a * b * b / l2;
            fer[7] = -p * a * a * (a + 3.0 * b) / l3;
            fer[11] = p * a * a * b / l2;
        }
        2 => {
            fer[2] = -p * b * b * (3.0 * a + b) / l3;
            fer[4] = p * a * b * b / l2;
            fer[8] = -p * a * a * (a + 3.0 * b) / l3;
            fer[10] = -p * a * a * b / l2;
        }
        _ => {}
    }

    fer
}

/// Fixed-end reactions for a concentrated moment about a local axis
///
/// Axis 0 is torsion about the element axis; axes 1 and 2 are bending
/// moments about local y and z.
///
/// # Arguments
/// * `m` - Moment magnitude
/// * `a` - Distance from the i-node to the moment
/// * `length` - Element length
/// * `axis` - Local moment axis (0=x, 1=y, 2=z)
pub fn fer_point_moment(m: f64, a: f64, length: f64, axis: usize) -> Vec12 {
    let l = length;
    let b = l - a;
    let l2 = l * l;
    let l3 = l2 * l;

    let mut fer = Vec12::zeros();

    match axis {
        0 => {
            fer[3] = -m * b / l;
            fer[9] = -m * a / l;
        }
        1 => {
            fer[2] = -6.0 * m * a * b / l3;
            fer[4] = m * b * (2.0 * a - b) / l2;
            fer[8] = 6.0 * m * a * b / l3;
            fer[10] = m * a * (2.0 * b - a) / l2;
        }
        2 => {
            fer[1] = 6.0 * m * a * b / l3;
            fer[5] = m * b * (2.0 * a - b) / l2;
            fer[7] = -6.0 * m * a * b / l3;
            fer[11] = m * a * (2.0 * b - a) / l2;
        }
        _ => {}
    }

    fer
}
