/// Rectangular row-major matrix addressed by `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    data: Box<[T]>,
    width: u16,
    height: u16,
}

impl<T: Copy> Grid<T> {
    pub fn new(width: u16, height: u16, cell: T) -> Self {
        let data = vec![cell; width as usize * height as usize].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    /// Builds a grid from cells already laid out row by row.
    ///
    /// # Panics
    /// If `data.len() != width * height`.
    pub fn from_vec(width: u16, height: u16, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            width as usize * height as usize,
            "grid data does not match its dimensions"
        );
        Grid {
            data: data.into_boxed_slice(),
            width,
            height,
        }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn is_in_bounds(&self, coord: (u16, u16)) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    /// Linear index of `(x, y)`: `y * width + x`.
    pub fn ravel_index(&self, x: u16, y: u16) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        y as usize * self.width as usize + x as usize
    }

    /// Inverse of [`Grid::ravel_index`].
    pub fn unravel_index(&self, index: usize) -> (u16, u16) {
        let width = self.width as usize;
        ((index % width) as u16, (index / width) as u16)
    }

    pub fn set(&mut self, coord: (u16, u16), cell: T) {
        let idx = self.ravel_index(coord.0, coord.1);
        self.data[idx] = cell;
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[T] {
        &self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.width as usize)
    }

    /// Returns a grid of the same shape with `f` applied to every cell.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            data: self.data.iter().map(|&c| f(c)).collect(),
            width: self.width,
            height: self.height,
        }
    }
}

impl<T> std::ops::Index<(u16, u16)> for Grid<T> {
    type Output = T;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.data[index.1 as usize * self.width as usize + index.0 as usize]
    }
}

impl<T> std::ops::IndexMut<(u16, u16)> for Grid<T> {
    fn index_mut(&mut self, index: (u16, u16)) -> &mut Self::Output {
        &mut self.data[index.1 as usize * self.width as usize + index.0 as usize]
    }
}
