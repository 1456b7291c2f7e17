//! Pre-trained risk classifier.
//!
//! The classifier is fitted offline and exported as JSON. Three model kinds
//! are understood: a linear model (one coefficient row per class), a single
//! decision tree in flat node-array form, and a random forest of such trees.
//! All of them map a normalized feature vector to a position in `classes`,
//! which holds the encoded label index for that position.

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, PipelineError};

/// Child index marking a leaf node.
pub const TREE_LEAF: i64 = -1;

/// Risk classifier over normalized feature vectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classifier {
    /// Encoded label index for each output position.
    classes: Vec<u32>,
    n_features: usize,
    #[serde(flatten)]
    model: ClassifierModel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierModel {
    Linear {
        /// One row per class, or a single row for a binary model.
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    DecisionTree {
        tree: DecisionTree,
    },
    RandomForest {
        trees: Vec<DecisionTree>,
    },
}

/// A fitted tree in flat array form.
///
/// Node `i` is a leaf when `children_left[i] == -1`; otherwise samples with
/// `x[feature[i]] <= threshold[i]` go left. `value[i]` holds the class
/// distribution at the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl Classifier {
    pub fn new(
        classes: Vec<u32>,
        n_features: usize,
        model: ClassifierModel,
    ) -> Result<Self, ArtifactError> {
        let clf = Self {
            classes,
            n_features,
            model,
        };
        clf.validate()?;
        Ok(clf)
    }

    /// Encoded label indices this classifier can emit.
    pub fn classes(&self) -> &[u32] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Check shapes so that [`predict`](Self::predict) can index without bounds failures.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let n_classes = self.classes.len();
        if n_classes == 0 {
            return Err(ArtifactError::Invalid("classifier has no classes".into()));
        }

        match &self.model {
            ClassifierModel::Linear { coef, intercept } => {
                if n_classes < 2 {
                    return Err(ArtifactError::Invalid(
                        "linear model needs at least two classes".into(),
                    ));
                }
                let rows = if n_classes == 2 { 1 } else { n_classes };
                if coef.len() != rows || intercept.len() != rows {
                    return Err(ArtifactError::Invalid(format!(
                        "linear model has {} coefficient rows and {} intercepts, expected {rows}",
                        coef.len(),
                        intercept.len()
                    )));
                }
                if let Some(row) = coef.iter().find(|row| row.len() != self.n_features) {
                    return Err(ArtifactError::Invalid(format!(
                        "coefficient row has {} values, expected {}",
                        row.len(),
                        self.n_features
                    )));
                }
            }
            ClassifierModel::DecisionTree { tree } => {
                tree.validate(self.n_features, n_classes)?;
            }
            ClassifierModel::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(ArtifactError::Invalid("random forest has no trees".into()));
                }
                for tree in trees {
                    tree.validate(self.n_features, n_classes)?;
                }
            }
        }
        Ok(())
    }

    /// Predict the encoded label index for one normalized row.
    pub fn predict(&self, x: &[f64]) -> Result<u32, PipelineError> {
        if x.len() != self.n_features {
            return Err(PipelineError::SchemaMismatch(format!(
                "classifier expects {} features, got {}",
                self.n_features,
                x.len()
            )));
        }

        let pos = match &self.model {
            ClassifierModel::Linear { coef, intercept } => {
                let scores: Vec<f64> = coef
                    .iter()
                    .zip(intercept)
                    .map(|(row, b)| dot(row, x) + b)
                    .collect();
                if scores.len() == 1 {
                    // Binary model: positive decision selects the second class.
                    usize::from(scores[0] > 0.0)
                } else {
                    argmax(&scores)
                }
            }
            ClassifierModel::DecisionTree { tree } => argmax(tree.leaf_value(x)),
            ClassifierModel::RandomForest { trees } => {
                let mut proba = vec![0.0f64; self.classes.len()];
                for tree in trees {
                    let leaf = tree.leaf_value(x);
                    let total: f64 = leaf.iter().sum();
                    if total > 0.0 {
                        for (p, v) in proba.iter_mut().zip(leaf) {
                            *p += v / total;
                        }
                    }
                }
                argmax(&proba)
            }
        };

        Ok(self.classes[pos])
    }
}

impl DecisionTree {
    fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), ArtifactError> {
        let n = self.n_nodes();
        if n == 0 {
            return Err(ArtifactError::Invalid("decision tree has no nodes".into()));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(ArtifactError::Invalid(
                "decision tree node arrays differ in length".into(),
            ));
        }

        for node in 0..n {
            if self.value[node].len() != n_classes {
                return Err(ArtifactError::Invalid(format!(
                    "tree node {node} has {} class values, expected {n_classes}",
                    self.value[node].len()
                )));
            }

            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == TREE_LEAF {
                continue;
            }
            // Children always follow their parent, which also rules out cycles.
            let child_ok = |c: i64| c > node as i64 && (c as usize) < n;
            if !child_ok(left) || !child_ok(right) {
                return Err(ArtifactError::Invalid(format!(
                    "tree node {node} has invalid children ({left}, {right})"
                )));
            }
            let f = self.feature[node];
            if f < 0 || f as usize >= n_features {
                return Err(ArtifactError::Invalid(format!(
                    "tree node {node} splits on feature {f}, only {n_features} available"
                )));
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf and return its class distribution.
    fn leaf_value(&self, x: &[f64]) -> &[f64] {
        let mut node = 0usize;
        while self.children_left[node] != TREE_LEAF {
            let f = self.feature[node] as usize;
            node = if x[f] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        &self.value[node]
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Index of the largest value; ties resolve to the first.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
