use argon2_fill::{reference_position, Instance, Params, SegmentPosition, Variant, SYNC_POINTS};
use bolero::check;

#[test]
fn fuzz_reference_window() {
    check!()
        .with_type::<(u8, u8, u8, u8, u16, u64)>()
        .for_each(|&(lanes, segment, pass, lane, index, rand)| {
            // =============================================================================
            // INSTANCE
            // =============================================================================

            let lanes = u32::from(lanes % 8) + 1;
            let segment_length = u32::from(segment % 32) + 2;
            let Ok(instance) = Instance::new(Params {
                lanes,
                memory_blocks: lanes * SYNC_POINTS * segment_length,
                passes: 3,
                variant: Variant::Argon2d,
                ..Params::default()
            }) else {
                return;
            };
            let layout = *instance.layout();

            // =============================================================================
            // POSITION
            // =============================================================================

            let pass = u32::from(pass % 3);
            let lane = u32::from(lane) % lanes;
            let slice = u32::from(index >> 8) % SYNC_POINTS;
            let position_in_segment = SegmentPosition::new(pass, lane, slice);
            let start = position_in_segment.starting_index();
            if start >= segment_length {
                return;
            }
            let index = start + u32::from(index & 0xFF) % (segment_length - start);
            let position = position_in_segment.at(index);

            // =============================================================================
            // VERIFICATION
            // =============================================================================

            let r = reference_position(&instance, position, rand);
            let current = position.index_in_lane(&layout);
            let active = layout.slice_start(slice)..layout.slice_start(slice + 1);

            assert!(r.lane < lanes);
            assert!(r.index < layout.lane_length());
            if pass == 0 && slice == 0 {
                assert_eq!(r.lane, lane, "first slice left its lane");
            }
            if r.lane == lane {
                assert!(!(current..active.end).contains(&r.index), "forward reference");
                assert_ne!(r.index, layout.previous_index(current));
            } else {
                assert!(!active.contains(&r.index), "unfinished cross-lane reference");
            }
        });
}
