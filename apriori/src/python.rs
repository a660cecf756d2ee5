use crate::config::MiningConfig;
use crate::error::MiningError;
use crate::mining::apriori_algorithm;
use crate::store::TransactionStore;
use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

impl From<MiningError> for PyErr {
    fn from(err: MiningError) -> Self {
        match err {
            MiningError::Io { .. } => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

type LevelArrays<'py> = (Bound<'py, PyArray2<usize>>, Bound<'py, PyArray1<usize>>);

/// Mines a one-hot transaction matrix.
///
/// Returns one `(itemsets, supports)` pair per itemset size, where
/// `itemsets` has one row per frequent itemset holding its column indices.
#[pyfunction]
#[pyo3(name = "apriori", signature = (transactions, min_support, parallel = false))]
fn apriori_py<'py>(
    py: Python<'py>,
    transactions: PyReadonlyArray2<'py, i32>,
    min_support: usize,
    parallel: bool,
) -> PyResult<Vec<LevelArrays<'py>>> {
    let store = TransactionStore::from_matrix(transactions.as_array())?;
    let config = MiningConfig::new(min_support).with_parallel(parallel);
    let outcome = py.allow_threads(|| apriori_algorithm(&store, &config))?;

    let mut result = Vec::new();
    for level in outcome.itemsets.levels() {
        let itemset_size = level.itemset_size;
        let num_itemsets = level.len();
        let mut data = Vec::with_capacity(num_itemsets * itemset_size);
        let mut supports = Vec::with_capacity(num_itemsets);

        for (itemset, support) in level.iter() {
            data.extend_from_slice(itemset);
            supports.push(support);
        }

        let array = Array2::from_shape_vec((num_itemsets, itemset_size), data)
            .map_err(|_| PyValueError::new_err("Failed to create array"))?;

        result.push((array.into_pyarray(py), Array1::from(supports).into_pyarray(py)));
    }

    Ok(result)
}

#[pymodule]
#[pyo3(name = "apriori")]
fn apriori_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(apriori_py, m)?)?;
    Ok(())
}
