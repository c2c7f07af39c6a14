use super::error::EngineError;
use super::node::Records;
use crate::domain::Value;

/// Cartesian product over a fixed list of sources, rightmost varying fastest.
///
/// Sources are drained into pools on the first pull, then combinations are
/// walked with an odometer. No sources yield one empty combination; any empty
/// source yields none.
pub(crate) struct Cartesian<'a> {
    sources: Option<Vec<Records<'a>>>,
    pools: Vec<Vec<Value>>,
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Cartesian<'a> {
    pub(crate) fn new(sources: Vec<Records<'a>>) -> Self {
        Self {
            sources: Some(sources),
            pools: Vec::new(),
            indices: Vec::new(),
            done: false,
        }
    }

    fn fill_pools(&mut self, sources: Vec<Records<'a>>) -> Result<(), EngineError> {
        self.pools = sources
            .into_iter()
            .map(|source| source.collect::<Result<Vec<_>, _>>())
            .collect::<Result<_, _>>()?;
        self.indices = vec![0; self.pools.len()];
        Ok(())
    }

    /// Move the odometer one step; false once every combination was seen
    fn advance(&mut self) -> bool {
        for position in (0..self.indices.len()).rev() {
            self.indices[position] += 1;
            if self.indices[position] < self.pools[position].len() {
                return true;
            }
            self.indices[position] = 0;
        }
        false
    }

    fn current(&self) -> Vec<Value> {
        self.indices
            .iter()
            .zip(&self.pools)
            .map(|(&index, pool)| pool[index].clone())
            .collect()
    }
}

impl Iterator for Cartesian<'_> {
    type Item = Result<Vec<Value>, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(sources) = self.sources.take() {
            if let Err(e) = self.fill_pools(sources) {
                self.done = true;
                return Some(Err(e));
            }
            if self.pools.iter().any(Vec::is_empty) {
                self.done = true;
                return None;
            }
            return Some(Ok(self.current()));
        }

        if self.advance() {
            Some(Ok(self.current()))
        } else {
            self.done = true;
            None
        }
    }
}
