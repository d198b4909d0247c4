use glam::DVec3;

use super::super::ViewModel;

const TRANSITION_RATE: f64 = 6.0;
const SETTLE_DISTANCE: f64 = 0.05;

impl ViewModel {
    pub(in crate::app) fn snap_display_positions(&mut self) {
        self.display_positions.clear();
        self.display_positions
            .extend(self.engine.nodes().iter().map(|node| node.position));
    }

    pub(in crate::app) fn step_display_positions(&mut self, delta_seconds: f64) -> bool {
        let nodes = self.engine.nodes();
        if self.display_positions.len() != nodes.len() || !self.animate_transitions {
            self.snap_display_positions();
            return false;
        }

        let blend = (delta_seconds * TRANSITION_RATE).clamp(0.0, 1.0);
        let mut moving = false;
        for (shown, node) in self.display_positions.iter_mut().zip(nodes) {
            let target = node.position;
            if shown.distance_squared(target) <= SETTLE_DISTANCE * SETTLE_DISTANCE {
                *shown = target;
                continue;
            }
            *shown = lerp(*shown, target, blend);
            moving = true;
        }
        moving
    }
}

fn lerp(from: DVec3, to: DVec3, amount: f64) -> DVec3 {
    from + (to - from) * amount
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        let from = DVec3::new(1.0, 2.0, 3.0);
        let to = DVec3::new(-1.0, 0.0, 9.0);
        assert_eq!(lerp(from, to, 0.0), from);
        assert_eq!(lerp(from, to, 1.0), to);
        assert_eq!(lerp(from, to, 0.5), DVec3::new(0.0, 1.0, 6.0));
    }
}
