//! Field operators for the stable-fluids scheme: boundary conditions,
//! Gauss-Seidel diffusion, pressure projection, and semi-Lagrangian
//! advection. All functions work on flat row-major slices of side `n`.

use rayon::prelude::*;

use crate::grid::cell_index;

/// Sweep count shared by the diffusion and pressure solves.
pub const GS_ITERATIONS: usize = 16;

/// Edge rule applied by [`set_boundary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Scalar,
    VelocityX,
    VelocityY,
}

/// Writes the ghost ring from the settled interior: each edge cell copies
/// its adjacent interior value, negated for the velocity component normal
/// to that wall, and corners average their two edge neighbors. Applying it
/// twice in a row is a fixed point.
pub fn set_boundary(kind: Boundary, field: &mut [f32], n: usize) {
    for x in 1..n - 1 {
        let top = field[x + n];
        let bottom = field[x + (n - 2) * n];
        field[x] = if kind == Boundary::VelocityY { -top } else { top };
        field[x + (n - 1) * n] = if kind == Boundary::VelocityY {
            -bottom
        } else {
            bottom
        };
    }
    for y in 1..n - 1 {
        let left = field[1 + y * n];
        let right = field[n - 2 + y * n];
        field[y * n] = if kind == Boundary::VelocityX { -left } else { left };
        field[n - 1 + y * n] = if kind == Boundary::VelocityX {
            -right
        } else {
            right
        };
    }

    field[0] = 0.5 * (field[1] + field[n]);
    field[n - 1] = 0.5 * (field[n - 2] + field[2 * n - 1]);
    field[(n - 1) * n] = 0.5 * (field[(n - 2) * n] + field[(n - 1) * n + 1]);
    field[n * n - 1] = 0.5 * (field[n * n - 2] + field[(n - 2) * n + n - 1]);
}

fn lin_solve(kind: Boundary, out: &mut [f32], input: &[f32], a: f32, c: f32, n: usize) {
    for _ in 0..GS_ITERATIONS {
        for y in 1..n - 1 {
            for x in 1..n - 1 {
                let idx = x + y * n;
                out[idx] = (input[idx]
                    + a * (out[idx - 1] + out[idx + 1] + out[idx - n] + out[idx + n]))
                    / c;
            }
        }
        set_boundary(kind, out, n);
    }
}

/// Implicit diffusion: relaxes `out` toward the neighbor average of
/// `input` with coefficient `a = dt * rate * (n-2)^2`.
pub fn diffuse(kind: Boundary, out: &mut [f32], input: &[f32], rate: f32, dt: f32, n: usize) {
    let a = dt * rate * ((n - 2) * (n - 2)) as f32;
    lin_solve(kind, out, input, a, 1.0 + 4.0 * a, n);
}

/// Removes the divergent component of the velocity field via a pressure
/// solve. `pressure` and `divergence` are scratch fields overwritten in
/// place.
pub fn project(
    vx: &mut [f32],
    vy: &mut [f32],
    pressure: &mut [f32],
    divergence: &mut [f32],
    n: usize,
) {
    let nf = n as f32;
    for y in 1..n - 1 {
        for x in 1..n - 1 {
            let idx = x + y * n;
            divergence[idx] =
                -0.5 * (vx[idx + 1] - vx[idx - 1] + vy[idx + n] - vy[idx - n]) / nf;
            pressure[idx] = 0.0;
        }
    }
    set_boundary(Boundary::Scalar, divergence, n);
    set_boundary(Boundary::Scalar, pressure, n);
    lin_solve(Boundary::Scalar, pressure, divergence, 1.0, 4.0, n);

    for y in 1..n - 1 {
        for x in 1..n - 1 {
            let idx = x + y * n;
            vx[idx] -= 0.5 * (pressure[idx + 1] - pressure[idx - 1]) * nf;
            vy[idx] -= 0.5 * (pressure[idx + n] - pressure[idx - n]) * nf;
        }
    }
    set_boundary(Boundary::VelocityX, vx, n);
    set_boundary(Boundary::VelocityY, vy, n);
}

/// Semi-Lagrangian transport: traces each interior cell backward through
/// the velocity field and bilinearly samples `input` at the source point.
/// Rows are independent, so the trace runs row-parallel.
pub fn advect(
    kind: Boundary,
    out: &mut [f32],
    input: &[f32],
    vx: &[f32],
    vy: &[f32],
    dt: f32,
    n: usize,
) {
    let dt0 = dt * (n - 2) as f32;
    out.par_chunks_mut(n)
        .enumerate()
        .skip(1)
        .take(n - 2)
        .for_each(|(j, row)| {
            for i in 1..n - 1 {
                let idx = i + j * n;
                let mut x = i as f32 - dt0 * vx[idx];
                let mut y = j as f32 - dt0 * vy[idx];
                if x < 0.5 {
                    x = 0.0;
                }
                if y < 0.5 {
                    y = 0.0;
                }
                let i0 = x.floor() as usize;
                let i1 = i0 + 1;
                let j0 = y.floor() as usize;
                let j1 = j0 + 1;
                let s1 = x - i0 as f32;
                let s0 = 1.0 - s1;
                let t1 = y - j0 as f32;
                let t0 = 1.0 - t1;

                row[i] = s0
                    * (t0 * input[cell_index(n, i0, j0)] + t1 * input[cell_index(n, i0, j1)])
                    + s1 * (t0 * input[cell_index(n, i1, j0)]
                        + t1 * input[cell_index(n, i1, j1)]);
            }
        });
    set_boundary(kind, out, n);
}
