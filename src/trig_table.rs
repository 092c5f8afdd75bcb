//! Quarter-wave sine table
//!
//! Entry `i` holds `(θ, sin θ)` for `θ = i·(π/2)/512`, both as raw Q15 words.
//! Angles strictly ascend and sines never descend; the last entry is pinned to
//! exactly `(π/2, 1)`.

/// Number of intervals covering `[0, π/2]`.
pub(crate) const SINE_INTERVALS: usize = 512;

pub(crate) static SINE_TABLE: [(i32, i32); SINE_INTERVALS + 1] = [
    (0, 0), (101, 101), (201, 201), (302, 302),
    (402, 402), (503, 503), (603, 603), (704, 704),
    (804, 804), (905, 905), (1005, 1005), (1106, 1106),
    (1206, 1206), (1307, 1307), (1407, 1407), (1508, 1507),
    (1608, 1608), (1709, 1708), (1810, 1809), (1910, 1909),
    (2011, 2009), (2111, 2110), (2212, 2210), (2312, 2310),
    (2413, 2411), (2513, 2511), (2614, 2611), (2714, 2711),
    (2815, 2811), (2915, 2912), (3016, 3012), (3116, 3112),
    (3217, 3212), (3318, 3312), (3418, 3412), (3519, 3512),
    (3619, 3612), (3720, 3712), (3820, 3812), (3921, 3911),
    (4021, 4011), (4122, 4111), (4222, 4211), (4323, 4310),
    (4423, 4410), (4524, 4510), (4624, 4609), (4725, 4709),
    (4825, 4808), (4926, 4907), (5027, 5007), (5127, 5106),
    (5228, 5205), (5328, 5305), (5429, 5404), (5529, 5503),
    (5630, 5602), (5730, 5701), (5831, 5800), (5931, 5899),
    (6032, 5998), (6132, 6097), (6233, 6195), (6333, 6294),
    (6434, 6393), (6535, 6491), (6635, 6590), (6736, 6688),
    (6836, 6787), (6937, 6885), (7037, 6983), (7138, 7081),
    (7238, 7180), (7339, 7278), (7439, 7376), (7540, 7473),
    (7640, 7571), (7741, 7669), (7841, 7767), (7942, 7864),
    (8042, 7962), (8143, 8059), (8244, 8157), (8344, 8254),
    (8445, 8351), (8545, 8449), (8646, 8546), (8746, 8643),
    (8847, 8740), (8947, 8836), (9048, 8933), (9148, 9030),
    (9249, 9127), (9349, 9223), (9450, 9319), (9550, 9416),
    (9651, 9512), (9752, 9608), (9852, 9704), (9953, 9800),
    (10053, 9896), (10154, 9992), (10254, 10088), (10355, 10183),
    (10455, 10279), (10556, 10374), (10656, 10469), (10757, 10565),
    (10857, 10660), (10958, 10755), (11058, 10850), (11159, 10945),
    (11259, 11039), (11360, 11134), (11461, 11228), (11561, 11323),
    (11662, 11417), (11762, 11511), (11863, 11605), (11963, 11699),
    (12064, 11793), (12164, 11887), (12265, 11980), (12365, 12074),
    (12466, 12167), (12566, 12261), (12667, 12354), (12767, 12447),
    (12868, 12540), (12968, 12633), (13069, 12725), (13170, 12818),
    (13270, 12910), (13371, 13003), (13471, 13095), (13572, 13187),
    (13672, 13279), (13773, 13371), (13873, 13463), (13974, 13554),
    (14074, 13646), (14175, 13737), (14275, 13828), (14376, 13919),
    (14476, 14010), (14577, 14101), (14678, 14192), (14778, 14282),
    (14879, 14373), (14979, 14463), (15080, 14553), (15180, 14643),
    (15281, 14733), (15381, 14823), (15482, 14912), (15582, 15002),
    (15683, 15091), (15783, 15180), (15884, 15269), (15984, 15358),
    (16085, 15447), (16185, 15535), (16286, 15624), (16387, 15712),
    (16487, 15800), (16588, 15888), (16688, 15976), (16789, 16064),
    (16889, 16151), (16990, 16239), (17090, 16326), (17191, 16413),
    (17291, 16500), (17392, 16587), (17492, 16673), (17593, 16760),
    (17693, 16846), (17794, 16932), (17895, 17018), (17995, 17104),
    (18096, 17190), (18196, 17275), (18297, 17361), (18397, 17446),
    (18498, 17531), (18598, 17616), (18699, 17700), (18799, 17785),
    (18900, 17869), (19000, 17953), (19101, 18037), (19201, 18121),
    (19302, 18205), (19402, 18288), (19503, 18372), (19604, 18455),
    (19704, 18538), (19805, 18621), (19905, 18703), (20006, 18786),
    (20106, 18868), (20207, 18950), (20307, 19032), (20408, 19114),
    (20508, 19195), (20609, 19277), (20709, 19358), (20810, 19439),
    (20910, 19520), (21011, 19601), (21112, 19681), (21212, 19761),
    (21313, 19841), (21413, 19921), (21514, 20001), (21614, 20081),
    (21715, 20160), (21815, 20239), (21916, 20318), (22016, 20397),
    (22117, 20475), (22217, 20554), (22318, 20632), (22418, 20710),
    (22519, 20788), (22619, 20865), (22720, 20943), (22821, 21020),
    (22921, 21097), (23022, 21174), (23122, 21251), (23223, 21327),
    (23323, 21403), (23424, 21479), (23524, 21555), (23625, 21631),
    (23725, 21706), (23826, 21781), (23926, 21856), (24027, 21931),
    (24127, 22006), (24228, 22080), (24328, 22154), (24429, 22228),
    (24530, 22302), (24630, 22375), (24731, 22449), (24831, 22522),
    (24932, 22595), (25032, 22668), (25133, 22740), (25233, 22812),
    (25334, 22884), (25434, 22956), (25535, 23028), (25635, 23099),
    (25736, 23170), (25836, 23241), (25937, 23312), (26038, 23383),
    (26138, 23453), (26239, 23523), (26339, 23593), (26440, 23663),
    (26540, 23732), (26641, 23801), (26741, 23870), (26842, 23939),
    (26942, 24008), (27043, 24076), (27143, 24144), (27244, 24212),
    (27344, 24279), (27445, 24347), (27545, 24414), (27646, 24481),
    (27747, 24548), (27847, 24614), (27948, 24680), (28048, 24746),
    (28149, 24812), (28249, 24878), (28350, 24943), (28450, 25008),
    (28551, 25073), (28651, 25138), (28752, 25202), (28852, 25266),
    (28953, 25330), (29053, 25394), (29154, 25457), (29255, 25520),
    (29355, 25583), (29456, 25646), (29556, 25708), (29657, 25771),
    (29757, 25833), (29858, 25894), (29958, 25956), (30059, 26017),
    (30159, 26078), (30260, 26139), (30360, 26199), (30461, 26259),
    (30561, 26320), (30662, 26379), (30762, 26439), (30863, 26498),
    (30964, 26557), (31064, 26616), (31165, 26674), (31265, 26733),
    (31366, 26791), (31466, 26848), (31567, 26906), (31667, 26963),
    (31768, 27020), (31868, 27077), (31969, 27133), (32069, 27190),
    (32170, 27246), (32270, 27301), (32371, 27357), (32472, 27412),
    (32572, 27467), (32673, 27522), (32773, 27576), (32874, 27630),
    (32974, 27684), (33075, 27738), (33175, 27791), (33276, 27844),
    (33376, 27897), (33477, 27950), (33577, 28002), (33678, 28054),
    (33778, 28106), (33879, 28158), (33979, 28209), (34080, 28260),
    (34181, 28311), (34281, 28361), (34382, 28411), (34482, 28461),
    (34583, 28511), (34683, 28560), (34784, 28610), (34884, 28658),
    (34985, 28707), (35085, 28755), (35186, 28803), (35286, 28851),
    (35387, 28899), (35487, 28946), (35588, 28993), (35688, 29040),
    (35789, 29086), (35890, 29132), (35990, 29178), (36091, 29224),
    (36191, 29269), (36292, 29314), (36392, 29359), (36493, 29404),
    (36593, 29448), (36694, 29492), (36794, 29535), (36895, 29579),
    (36995, 29622), (37096, 29665), (37196, 29707), (37297, 29750),
    (37398, 29792), (37498, 29833), (37599, 29875), (37699, 29916),
    (37800, 29957), (37900, 29997), (38001, 30038), (38101, 30078),
    (38202, 30118), (38302, 30157), (38403, 30196), (38503, 30235),
    (38604, 30274), (38704, 30312), (38805, 30350), (38905, 30388),
    (39006, 30425), (39107, 30462), (39207, 30499), (39308, 30536),
    (39408, 30572), (39509, 30608), (39609, 30644), (39710, 30680),
    (39810, 30715), (39911, 30750), (40011, 30784), (40112, 30819),
    (40212, 30853), (40313, 30886), (40413, 30920), (40514, 30953),
    (40615, 30986), (40715, 31018), (40816, 31050), (40916, 31082),
    (41017, 31114), (41117, 31146), (41218, 31177), (41318, 31207),
    (41419, 31238), (41519, 31268), (41620, 31298), (41720, 31328),
    (41821, 31357), (41921, 31386), (42022, 31415), (42122, 31443),
    (42223, 31471), (42324, 31499), (42424, 31527), (42525, 31554),
    (42625, 31581), (42726, 31608), (42826, 31634), (42927, 31660),
    (43027, 31686), (43128, 31711), (43228, 31737), (43329, 31761),
    (43429, 31786), (43530, 31810), (43630, 31834), (43731, 31858),
    (43832, 31881), (43932, 31904), (44033, 31927), (44133, 31950),
    (44234, 31972), (44334, 31994), (44435, 32015), (44535, 32037),
    (44636, 32058), (44736, 32078), (44837, 32099), (44937, 32119),
    (45038, 32138), (45138, 32158), (45239, 32177), (45339, 32196),
    (45440, 32214), (45541, 32233), (45641, 32251), (45742, 32268),
    (45842, 32286), (45943, 32303), (46043, 32319), (46144, 32336),
    (46244, 32352), (46345, 32368), (46445, 32383), (46546, 32398),
    (46646, 32413), (46747, 32428), (46847, 32442), (46948, 32456),
    (47048, 32470), (47149, 32483), (47250, 32496), (47350, 32509),
    (47451, 32522), (47551, 32534), (47652, 32546), (47752, 32557),
    (47853, 32568), (47953, 32579), (48054, 32590), (48154, 32600),
    (48255, 32610), (48355, 32620), (48456, 32629), (48556, 32638),
    (48657, 32647), (48758, 32656), (48858, 32664), (48959, 32672),
    (49059, 32679), (49160, 32686), (49260, 32693), (49361, 32700),
    (49461, 32706), (49562, 32712), (49662, 32718), (49763, 32723),
    (49863, 32729), (49964, 32733), (50064, 32738), (50165, 32742),
    (50265, 32746), (50366, 32749), (50467, 32753), (50567, 32756),
    (50668, 32758), (50768, 32760), (50869, 32762), (50969, 32764),
    (51070, 32766), (51170, 32767), (51271, 32767), (51371, 32768),
    (51472, 32768),
];
