//! 视网膜特征模拟
//!
//! 在文档化区间内随机采样四组病变特征，模拟一次“检测”的输出

use drs_core::{
    CottonWoolGroup, ExudateGroup, HemorrhageGroup, MicroaneurysmGroup, Point, RetinalFeatureSet,
    SpotDistribution,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// 坐标点距图像边缘的留白（像素）
const EDGE_MARGIN: u32 = 50;

/// 各特征组的坐标点数量（与计数无关，固定值）
const MICROANEURYSM_POINTS: usize = 10;
const HEMORRHAGE_POINTS: usize = 8;
const EXUDATE_POINTS: usize = 12;
const COTTON_WOOL_POINTS: usize = 6;

/// 视网膜特征模拟器
///
/// 无内部状态，随机源由调用方显式注入
#[derive(Debug, Clone, Default)]
pub struct FeatureSimulator;

impl FeatureSimulator {
    /// 创建新的特征模拟器
    pub fn new() -> Self {
        Self
    }

    /// 对一幅 width x height 的图像采样完整特征集合
    pub fn sample(&self, rng: &mut impl Rng, width: u32, height: u32) -> RetinalFeatureSet {
        let microaneurysms = MicroaneurysmGroup {
            count: rng.gen_range(0..=60),
            density: rng.gen_range(0.0..1.0),
            locations: sample_locations(rng, MICROANEURYSM_POINTS, width, height),
        };

        let hemorrhages = HemorrhageGroup {
            count: rng.gen_range(0..=35),
            size_variance: rng.gen_range(0.1..2.0),
            locations: sample_locations(rng, HEMORRHAGE_POINTS, width, height),
        };

        let exudates = ExudateGroup {
            count: rng.gen_range(0..=45),
            intensity: rng.gen_range(0.0..1.0),
            macular_involvement: rng.gen_bool(0.5),
            locations: sample_locations(rng, EXUDATE_POINTS, width, height),
        };

        let distributions = [
            SpotDistribution::Focal,
            SpotDistribution::Scattered,
            SpotDistribution::Clustered,
        ];
        let cotton_wool_spots = CottonWoolGroup {
            count: rng.gen_range(0..=15),
            distribution: *distributions
                .choose(rng)
                .unwrap_or(&SpotDistribution::Scattered),
            locations: sample_locations(rng, COTTON_WOOL_POINTS, width, height),
        };

        RetinalFeatureSet {
            microaneurysms,
            hemorrhages,
            exudates,
            cotton_wool_spots,
        }
    }
}

/// 在留白区间内采样坐标点
fn sample_locations(rng: &mut impl Rng, count: usize, width: u32, height: u32) -> Vec<Point> {
    (0..count)
        .map(|_| Point {
            x: sample_axis(rng, width),
            y: sample_axis(rng, height),
        })
        .collect()
}

/// 单轴采样，区间 [EDGE_MARGIN, dim - EDGE_MARGIN]；图像过小时退化为轴中点
fn sample_axis(rng: &mut impl Rng, dim: u32) -> u32 {
    if dim <= 2 * EDGE_MARGIN {
        return dim / 2;
    }
    rng.gen_range(EDGE_MARGIN..=dim - EDGE_MARGIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sampled_values_within_ranges() {
        let simulator = FeatureSimulator::new();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let features = simulator.sample(&mut rng, 512, 512);

            assert!(features.microaneurysms.count <= 60);
            assert!(features.microaneurysms.density >= 0.0 && features.microaneurysms.density < 1.0);

            assert!(features.hemorrhages.count <= 35);
            assert!(features.hemorrhages.size_variance >= 0.1);
            assert!(features.hemorrhages.size_variance < 2.0);

            assert!(features.exudates.count <= 45);
            assert!(features.exudates.intensity >= 0.0 && features.exudates.intensity < 1.0);

            assert!(features.cotton_wool_spots.count <= 15);
        }
    }

    #[test]
    fn test_location_list_lengths_are_fixed() {
        let simulator = FeatureSimulator::new();
        let mut rng = StdRng::seed_from_u64(11);

        let features = simulator.sample(&mut rng, 512, 512);
        assert_eq!(features.microaneurysms.locations.len(), 10);
        assert_eq!(features.hemorrhages.locations.len(), 8);
        assert_eq!(features.exudates.locations.len(), 12);
        assert_eq!(features.cotton_wool_spots.locations.len(), 6);
    }

    #[test]
    fn test_locations_respect_edge_margin() {
        let simulator = FeatureSimulator::new();
        let mut rng = StdRng::seed_from_u64(13);

        for _ in 0..50 {
            let features = simulator.sample(&mut rng, 512, 384);
            let all_points = features
                .microaneurysms
                .locations
                .iter()
                .chain(features.hemorrhages.locations.iter())
                .chain(features.exudates.locations.iter())
                .chain(features.cotton_wool_spots.locations.iter());

            for point in all_points {
                assert!(point.x >= 50 && point.x <= 512 - 50);
                assert!(point.y >= 50 && point.y <= 384 - 50);
            }
        }
    }

    #[test]
    fn test_tiny_image_falls_back_to_center() {
        let simulator = FeatureSimulator::new();
        let mut rng = StdRng::seed_from_u64(17);

        let features = simulator.sample(&mut rng, 80, 60);
        for point in &features.microaneurysms.locations {
            assert_eq!(point.x, 40);
            assert_eq!(point.y, 30);
        }
    }
}
