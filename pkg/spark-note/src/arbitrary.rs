use proptest::arbitrary::{any, Arbitrary};
use proptest::collection::vec;
use proptest::strategy::{BoxedStrategy, Strategy};

use crate::{Note, Secret};

impl Arbitrary for Secret {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        vec(any::<u8>(), 1..=64).prop_map(Secret::from_checked).boxed()
    }
}

impl Arbitrary for Note {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        (any::<u64>(), any::<Secret>())
            .prop_map(|(value, secret)| Note::new(value, secret))
            .boxed()
    }
}
