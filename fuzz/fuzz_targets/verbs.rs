#![no_main]

use aivi_assert::expect;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 512 {
        return;
    }
    let src = String::from_utf8_lossy(data);
    let Some((left, right)) = src.split_once(',') else {
        return;
    };

    let above = expect(left).bignumber().above(right);
    let most = expect(left).bignumber().most(right);
    // Either both operands convert or both verbs fail the same way.
    match (above, most) {
        (Ok(_), Ok(_)) => panic!("above and most both held for {left:?} and {right:?}"),
        (Err(a), Err(b)) => assert_eq!(a.kind, b.kind),
        _ => {}
    }

    if let (Ok(_), Ok(_)) = (
        expect(left).bignumber().equal(right),
        expect(left).bignumber().not().equal(right),
    ) {
        panic!("equal and not.equal both held for {left:?} and {right:?}");
    }
});
