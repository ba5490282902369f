use chrono::{Duration, Utc};
use noma_stream_core::moment::{Category, Moment};

/// Bundled demo pool used when no remote source is configured.
///
/// Handwritten moments covering every category, with enough weight in the
/// pool for the paced arrangement to have real choices to make.
pub fn pool() -> Vec<Moment> {
    let now = Utc::now();
    let moment = |id: &str,
                  category: Category,
                  body: &str,
                  alias: &str,
                  hearts: u32,
                  replies: u32,
                  minutes_ago: i64| Moment {
        id: id.to_string(),
        category,
        body: body.to_string(),
        alias: alias.to_string(),
        heart_count: hearts,
        reply_count: replies,
        hearted: false,
        saved: false,
        created_at: now - Duration::minutes(minutes_ago),
    };

    vec![
        moment(
            "nm-0101",
            Category::Confession,
            "I moved across the country for a fresh start and I still haven't told my family the real reason I left.",
            "night heron",
            214,
            31,
            22,
        ),
        moment(
            "nm-0102",
            Category::Validation,
            "Got through a whole work call today without apologizing for myself once. Small thing, but it felt huge.",
            "quiet fern",
            89,
            12,
            36,
        ),
        moment(
            "nm-0103",
            Category::Prompt,
            "What's a smell that takes you straight back to being a kid?",
            "paper lantern",
            45,
            64,
            50,
        ),
        moment(
            "nm-0104",
            Category::Confession,
            "I've been pretending to understand my job for two years. Every project I finish feels like getting away with something.",
            "grey harbor",
            367,
            48,
            65,
        ),
        moment(
            "nm-0105",
            Category::Reassurance,
            "If nobody told you today: resting is not the same as giving up.",
            "warm static",
            502,
            19,
            80,
        ),
        moment(
            "nm-0106",
            Category::Guidance,
            "I keep a 'done list' next to my to-do list. Writing down what I actually finished rewired how my evenings feel.",
            "slow river",
            143,
            22,
            95,
        ),
        moment(
            "nm-0107",
            Category::Validation,
            "Six months sober today. Nobody in my life knows the date matters, so I'm telling you all instead.",
            "copper finch",
            841,
            96,
            110,
        ),
        moment(
            "nm-0108",
            Category::Confession,
            "My best friend and I drifted apart and I let it happen because keeping up felt like work. I miss her every day.",
            "low tide",
            296,
            41,
            130,
        ),
        moment(
            "nm-0109",
            Category::Prompt,
            "Describe your week in exactly three words.",
            "pocket compass",
            61,
            152,
            145,
        ),
        moment(
            "nm-0110",
            Category::Reassurance,
            "You are allowed to outgrow the version of yourself that other people are still expecting.",
            "early frost",
            433,
            15,
            170,
        ),
        moment(
            "nm-0111",
            Category::Guidance,
            "When I can't start a task, I set a timer for two minutes and give myself permission to stop when it rings. I almost never stop.",
            "tin whistle",
            188,
            27,
            190,
        ),
        moment(
            "nm-0112",
            Category::Confession,
            "I cried in the supermarket parking lot over a song that reminded me of my dad. First time I've let myself feel it in years.",
            "winter wren",
            529,
            58,
            220,
        ),
        moment(
            "nm-0113",
            Category::Validation,
            "I asked for help today instead of white-knuckling it alone. My therapist would be proud and honestly, so am I.",
            "open window",
            176,
            14,
            250,
        ),
        moment(
            "nm-0114",
            Category::Prompt,
            "What's the kindest thing a stranger ever did for you?",
            "lost mitten",
            92,
            118,
            280,
        ),
        moment(
            "nm-0115",
            Category::Confession,
            "I'm the 'strong one' in my family and I have no idea who I'd even call if I stopped being okay.",
            "still water",
            612,
            74,
            320,
        ),
        moment(
            "nm-0116",
            Category::Reassurance,
            "Whatever you didn't get done today will wait for you. It always does. Sleep.",
            "soft landing",
            355,
            9,
            350,
        ),
        moment(
            "nm-0117",
            Category::Guidance,
            "Unfollowing accounts that made me compare myself did more for my mood than any app I ever downloaded.",
            "north field",
            267,
            33,
            400,
        ),
        moment(
            "nm-0118",
            Category::Validation,
            "Cooked a real dinner for one tonight, set the table and everything. Turns out I'm worth the effort.",
            "small hours",
            148,
            21,
            430,
        ),
        moment(
            "nm-0119",
            Category::Confession,
            "I turned down the promotion everyone said I wanted. I've never felt relief like the walk home that day.",
            "spare key",
            391,
            52,
            480,
        ),
        moment(
            "nm-0120",
            Category::Prompt,
            "If your anxiety had a job title, what would it be?",
            "loose thread",
            83,
            201,
            520,
        ),
        moment(
            "nm-0121",
            Category::Reassurance,
            "Healing isn't linear. A bad day after ten good ones is not a relapse, it's a Tuesday.",
            "harbor light",
            467,
            26,
            560,
        ),
        moment(
            "nm-0122",
            Category::Guidance,
            "Say the kind thing out loud. The compliment you're thinking about a stranger's jacket costs nothing and lands forever.",
            "clear morning",
            205,
            17,
            600,
        ),
    ]
}
