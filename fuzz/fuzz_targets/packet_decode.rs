#![no_main]

use codec::{decode_body, decode_packet, encode_packet, CodecContext};
use libfuzzer_sys::fuzz_target;
use wire::FrameIter;

fuzz_target!(|data: &[u8]| {
    let ctx = CodecContext::for_testing();
    let mut first = vec![0u8; usize::from(u16::MAX)];
    let mut second = vec![0u8; usize::from(u16::MAX)];

    for item in FrameIter::new(data, &ctx.wire_limits) {
        let Ok((_, frame)) = item else { break };
        let Ok(packet) = decode_body(frame, &ctx) else {
            continue;
        };

        // Anything that decodes must re-encode to a stable frame.
        let len = encode_packet(&packet, &ctx, &mut first).expect("re-encode decoded packet");
        let again = decode_packet(&first[..len], &ctx).expect("decode re-encoded packet");
        let again_len = encode_packet(&again, &ctx, &mut second).expect("encode twice");
        assert_eq!(&first[..len], &second[..again_len]);
    }
});
