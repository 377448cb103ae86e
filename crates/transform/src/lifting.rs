//! Separable 2-D and 3-D extension of any 1-D transform.
//!
//! A 2-D forward pass transforms every row, then every column of the result;
//! the reverse pass undoes columns first, then rows. In 3-D the last axis is
//! processed first, then the middle one, then the planes along axis 0; the
//! reverse runs the axes in the opposite order. Each lane is copied out,
//! transformed on its own and written back, so lanes can run on a
//! [`ParallelScheduler`] without changing the result.

use ndarray::{Array, Array2, Array3, ArrayView1, Axis, Dimension};
use num_complex::Complex64;
use tracing::{debug, trace};

use crate::error::TransformError;
use crate::parallel::ParallelScheduler;
use crate::transform::Transform;

#[derive(Clone, Copy, Debug)]
enum Direction {
    Forward,
    Reverse,
}

#[derive(Clone, Copy, Debug)]
enum Depth {
    Full,
    Level(usize),
}

/// Element types a lane can hold.
trait Sample: Clone + Send + Sync {
    fn apply(
        t: &dyn Transform,
        lane: &[Self],
        direction: Direction,
        depth: Depth,
    ) -> Result<Vec<Self>, TransformError>;
}

impl Sample for f64 {
    fn apply(
        t: &dyn Transform,
        lane: &[f64],
        direction: Direction,
        depth: Depth,
    ) -> Result<Vec<f64>, TransformError> {
        match (direction, depth) {
            (Direction::Forward, Depth::Full) => t.forward(lane),
            (Direction::Reverse, Depth::Full) => t.reverse(lane),
            (Direction::Forward, Depth::Level(l)) => t.forward_level(lane, l),
            (Direction::Reverse, Depth::Level(l)) => t.reverse_level(lane, l),
        }
    }
}

impl Sample for Complex64 {
    fn apply(
        t: &dyn Transform,
        lane: &[Complex64],
        direction: Direction,
        depth: Depth,
    ) -> Result<Vec<Complex64>, TransformError> {
        match (direction, depth) {
            (Direction::Forward, Depth::Full) => t.forward_complex(lane),
            (Direction::Reverse, Depth::Full) => t.reverse_complex(lane),
            (Direction::Forward, Depth::Level(l)) => t.forward_complex_level(lane, l),
            (Direction::Reverse, Depth::Level(l)) => t.reverse_complex_level(lane, l),
        }
    }
}

/// Applies a 1-D transform along each axis of a matrix or volume.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use pyramid_transform::DimensionalLifting;
/// use pyramid_wavelet::{FastWaveletTransform, Wavelet};
///
/// let fwt = FastWaveletTransform::new(Wavelet::Haar.filter());
/// let lifting = DimensionalLifting::new(&fwt);
/// let m = array![[1.0, 1.0], [1.0, 1.0]];
/// let coeffs = lifting.forward_2d(&m)?;
/// assert!((coeffs[[0, 0]] - 2.0).abs() < 1e-12);
/// let back = lifting.reverse_2d(&coeffs)?;
/// assert!((back[[1, 1]] - 1.0).abs() < 1e-12);
/// # Ok::<(), pyramid_transform::TransformError>(())
/// ```
#[derive(Clone, Copy)]
pub struct DimensionalLifting<'a> {
    transform: &'a dyn Transform,
    scheduler: Option<&'a ParallelScheduler>,
}

impl<'a> DimensionalLifting<'a> {
    /// Lifts `transform` sequentially.
    pub fn new(transform: &'a dyn Transform) -> Self {
        Self {
            transform,
            scheduler: None,
        }
    }

    /// Processes the lanes of each axis on `scheduler`.
    pub fn with_scheduler(mut self, scheduler: &'a ParallelScheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Full-depth 2-D forward: rows, then columns.
    pub fn forward_2d(&self, m: &Array2<f64>) -> Result<Array2<f64>, TransformError> {
        self.lift(m, &[(Axis(1), Depth::Full), (Axis(0), Depth::Full)], Direction::Forward)
    }

    /// Full-depth 2-D reverse: columns, then rows.
    pub fn reverse_2d(&self, m: &Array2<f64>) -> Result<Array2<f64>, TransformError> {
        self.lift(m, &[(Axis(0), Depth::Full), (Axis(1), Depth::Full)], Direction::Reverse)
    }

    /// 2-D forward stopping after `row_level` steps along each row and
    /// `col_level` steps along each column.
    pub fn forward_2d_levels(
        &self,
        m: &Array2<f64>,
        row_level: usize,
        col_level: usize,
    ) -> Result<Array2<f64>, TransformError> {
        self.lift(
            m,
            &[
                (Axis(1), Depth::Level(row_level)),
                (Axis(0), Depth::Level(col_level)),
            ],
            Direction::Forward,
        )
    }

    /// Inverse of [`forward_2d_levels`](Self::forward_2d_levels).
    pub fn reverse_2d_levels(
        &self,
        m: &Array2<f64>,
        row_level: usize,
        col_level: usize,
    ) -> Result<Array2<f64>, TransformError> {
        self.lift(
            m,
            &[
                (Axis(0), Depth::Level(col_level)),
                (Axis(1), Depth::Level(row_level)),
            ],
            Direction::Reverse,
        )
    }

    /// 2-D forward over complex entries.
    pub fn forward_2d_complex(
        &self,
        m: &Array2<Complex64>,
    ) -> Result<Array2<Complex64>, TransformError> {
        self.lift(m, &[(Axis(1), Depth::Full), (Axis(0), Depth::Full)], Direction::Forward)
    }

    /// 2-D reverse over complex entries.
    pub fn reverse_2d_complex(
        &self,
        m: &Array2<Complex64>,
    ) -> Result<Array2<Complex64>, TransformError> {
        self.lift(m, &[(Axis(0), Depth::Full), (Axis(1), Depth::Full)], Direction::Reverse)
    }

    /// Full-depth 3-D forward: the 2-D operator on every plane, then along
    /// axis 0.
    pub fn forward_3d(&self, s: &Array3<f64>) -> Result<Array3<f64>, TransformError> {
        self.lift(s, &FULL_3D, Direction::Forward)
    }

    /// Full-depth 3-D reverse.
    pub fn reverse_3d(&self, s: &Array3<f64>) -> Result<Array3<f64>, TransformError> {
        let mut plan = FULL_3D;
        plan.reverse();
        self.lift(s, &plan, Direction::Reverse)
    }

    /// 3-D forward with a level per axis; `levels[i]` applies along `Axis(i)`.
    pub fn forward_3d_levels(
        &self,
        s: &Array3<f64>,
        levels: [usize; 3],
    ) -> Result<Array3<f64>, TransformError> {
        let plan = [
            (Axis(2), Depth::Level(levels[2])),
            (Axis(1), Depth::Level(levels[1])),
            (Axis(0), Depth::Level(levels[0])),
        ];
        self.lift(s, &plan, Direction::Forward)
    }

    /// Inverse of [`forward_3d_levels`](Self::forward_3d_levels).
    pub fn reverse_3d_levels(
        &self,
        s: &Array3<f64>,
        levels: [usize; 3],
    ) -> Result<Array3<f64>, TransformError> {
        let plan = [
            (Axis(0), Depth::Level(levels[0])),
            (Axis(1), Depth::Level(levels[1])),
            (Axis(2), Depth::Level(levels[2])),
        ];
        self.lift(s, &plan, Direction::Reverse)
    }

    /// 3-D forward over complex entries.
    pub fn forward_3d_complex(
        &self,
        s: &Array3<Complex64>,
    ) -> Result<Array3<Complex64>, TransformError> {
        self.lift(s, &FULL_3D, Direction::Forward)
    }

    /// 3-D reverse over complex entries.
    pub fn reverse_3d_complex(
        &self,
        s: &Array3<Complex64>,
    ) -> Result<Array3<Complex64>, TransformError> {
        let mut plan = FULL_3D;
        plan.reverse();
        self.lift(s, &plan, Direction::Reverse)
    }

    /// Runs the axis passes in `plan` order on a copy of `data`.
    fn lift<A: Sample, D: Dimension>(
        &self,
        data: &Array<A, D>,
        plan: &[(Axis, Depth)],
        direction: Direction,
    ) -> Result<Array<A, D>, TransformError> {
        if data.is_empty() {
            return Err(TransformError::EmptyInput);
        }
        debug!(
            shape = ?data.shape(),
            ?direction,
            transform = self.transform.name(),
            parallel = self.scheduler.is_some(),
            "lifting"
        );
        let mut out = data.to_owned();
        for &(axis, depth) in plan {
            self.along(&mut out, axis, direction, depth)?;
        }
        Ok(out)
    }

    fn along<A: Sample, D: Dimension>(
        &self,
        data: &mut Array<A, D>,
        axis: Axis,
        direction: Direction,
        depth: Depth,
    ) -> Result<(), TransformError> {
        let mut lanes: Vec<Vec<A>> = data.lanes(axis).into_iter().map(|l| l.to_vec()).collect();
        trace!(axis = axis.index(), lanes = lanes.len(), ?depth, "axis pass");

        let transform = self.transform;
        let op = |lane: &mut Vec<A>| -> Result<(), TransformError> {
            *lane = A::apply(transform, lane, direction, depth)?;
            Ok(())
        };
        match self.scheduler {
            Some(s) => s.try_for_each(&mut lanes, op)?,
            None => lanes.iter_mut().try_for_each(op)?,
        }

        for (mut dst, src) in data.lanes_mut(axis).into_iter().zip(&lanes) {
            dst.assign(&ArrayView1::from(src.as_slice()));
        }
        Ok(())
    }
}

const FULL_3D: [(Axis, Depth); 3] = [
    (Axis(2), Depth::Full),
    (Axis(1), Depth::Full),
    (Axis(0), Depth::Full),
];
