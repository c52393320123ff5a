use crate::fx::{BlendChild, BlendTree, BlendTreeKind, FloatParam, Motion};
use crate::parameters::OWNED_PREFIX;

/// One per-item on/off motion pair, driven 0..=1 by a float parameter.
#[derive(Debug, Clone)]
pub struct BlendMotionEntry {
    pub on: Motion,
    pub off: Motion,
    pub param: FloatParam,
}

/// Accumulates blend motion pairs during the generate pass; consumed exactly
/// once when the shared direct blend tree is merged at finalize. Entries are
/// never deduplicated: two items registering the same driving parameter get
/// two independent children.
#[derive(Debug, Default)]
pub struct BlendMotionCollector {
    entries: Vec<BlendMotionEntry>,
}

pub fn weight_parameter_name() -> String {
    format!("{OWNED_PREFIX}Internal-BlendTree-Weight")
}

pub fn blend_state_name() -> String {
    format!("{OWNED_PREFIX}Internal-BlendTree State (WD On)")
}

impl BlendMotionCollector {
    pub fn register(&mut self, on: Motion, off: Motion, param: FloatParam) {
        self.entries.push(BlendMotionEntry { on, off, param });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Combine all collected pairs into one direct blend tree: every entry
    /// becomes a nested 1D tree interpolating off -> on over its driving
    /// parameter, all weighted by the single constant-1 `weight` parameter.
    pub fn merge(self, weight: &FloatParam) -> BlendTree {
        let mut children = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            let nested = BlendTree {
                name: entry.param.name().to_string(),
                kind: BlendTreeKind::Simple1D,
                blend_parameter: Some(entry.param.name().to_string()),
                children: vec![
                    BlendChild {
                        motion: entry.off,
                        threshold: 0.0,
                        direct_blend_parameter: None,
                        time_scale: 1.0,
                    },
                    BlendChild {
                        motion: entry.on,
                        threshold: 1.0,
                        direct_blend_parameter: None,
                        time_scale: 1.0,
                    },
                ],
            };
            children.push(BlendChild {
                motion: Motion::BlendTree(nested),
                threshold: 0.0,
                direct_blend_parameter: Some(weight.name().to_string()),
                time_scale: 1.0,
            });
        }

        BlendTree {
            name: format!("{OWNED_PREFIX}Internal-BlendTree (WD On)"),
            kind: BlendTreeKind::Direct,
            blend_parameter: Some(weight.name().to_string()),
            children,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fx::{AnimatorController, ClipRef};

    fn clip(name: &str) -> Motion {
        Motion::Clip(ClipRef {
            name: name.to_string(),
        })
    }

    #[test]
    fn test_merge_keeps_duplicate_driving_parameters() {
        let mut fx = AnimatorController::default();
        let shared = fx.ensure_float("MGenShared", 0.0);
        let weight = fx.ensure_float(&weight_parameter_name(), 1.0);

        let mut collector = BlendMotionCollector::default();
        collector.register(clip("a_on"), clip("a_off"), shared.clone());
        collector.register(clip("b_on"), clip("b_off"), shared);
        assert_eq!(collector.len(), 2);

        let tree = collector.merge(&weight);
        assert_eq!(tree.kind, BlendTreeKind::Direct);
        assert_eq!(tree.children.len(), 2);
        for child in &tree.children {
            assert_eq!(
                child.direct_blend_parameter.as_deref(),
                Some("MGenInternal-BlendTree-Weight")
            );
            let Motion::BlendTree(nested) = &child.motion else {
                panic!("expected nested 1D tree");
            };
            assert_eq!(nested.kind, BlendTreeKind::Simple1D);
            assert_eq!(nested.blend_parameter.as_deref(), Some("MGenShared"));
            assert_eq!(nested.children[0].threshold, 0.0);
            assert_eq!(nested.children[1].threshold, 1.0);
        }
    }

    #[test]
    fn test_nested_tree_orders_off_then_on() {
        let mut fx = AnimatorController::default();
        let param = fx.ensure_float("MGenHat", 0.0);
        let weight = fx.ensure_float(&weight_parameter_name(), 1.0);

        let mut collector = BlendMotionCollector::default();
        collector.register(clip("on"), clip("off"), param);

        let tree = collector.merge(&weight);
        let Motion::BlendTree(nested) = &tree.children[0].motion else {
            panic!("expected nested 1D tree");
        };
        assert_eq!(nested.children[0].motion, clip("off"));
        assert_eq!(nested.children[1].motion, clip("on"));
    }
}
