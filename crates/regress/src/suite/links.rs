use crate::doctest::{DocModule, DocUnit};
use crate::provider::TestProvider;

const LINK: &str = r#"
    Links given by planar diagram codes.

        >>> crossings 4_1
        4
        >>> components L2a1
        2
        >>> components 9_42
        Error: unknown link: 9_42
"#;

const LINK_EXTERIOR: &str = r#"
    The census manifold of the link complement, when it is in the census.

        >>> exterior 4_1
        m004
        >>> exterior 3_1
        None
"#;

pub fn links_modules() -> Vec<DocModule> {
    vec![DocModule::new(
        "links",
        vec![
            DocUnit::new("Link", LINK),
            DocUnit::new("Link.exterior", LINK_EXTERIOR),
        ],
    )]
}

pub fn provider() -> TestProvider {
    TestProvider::self_reporting("links", |env, ctx| super::run_docs(&links_modules(), env, ctx))
}
